//! Parley core library: chat server client, client-side store and action creators
//! shared by the CLI and any UI front end.

pub mod actions;
pub mod api;
pub mod config;
pub mod init;
pub mod notification;
pub mod search;
pub mod store;

#[cfg(test)]
mod testing;
