//! Chat server API: the `ChatApi` seam used by action creators and its HTTP implementation.

mod client;
mod types;

pub use client::ServerClient;
pub use types::{ClientConfig, ClientLicense, Post, PostList, Team, TeamMember};

use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("server request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("server api error: {status} {message}")]
    Api { status: u16, message: String },
    #[error("unexpected server response: {0}")]
    Decode(String),
}

/// Calls into the chat server. Implemented by [`ServerClient`]; tests substitute their own.
#[async_trait]
pub trait ChatApi: Send + Sync {
    async fn get_client_config(&self) -> Result<ClientConfig, ApiError>;

    async fn get_license_config(&self) -> Result<ClientLicense, ApiError>;

    /// Teams the current user belongs to.
    async fn get_my_teams(&self) -> Result<Vec<Team>, ApiError>;

    /// The current user's team memberships.
    async fn get_my_team_members(&self) -> Result<Vec<TeamMember>, ApiError>;

    /// First page of a channel's posts.
    async fn get_posts(&self, channel_id: &str) -> Result<PostList, ApiError>;

    /// Create a post; returns the post as stored by the server (with its assigned id).
    async fn create_post(&self, post: &Post) -> Result<Post, ApiError>;

    async fn search_posts(
        &self,
        team_id: &str,
        terms: &str,
        is_or_search: bool,
    ) -> Result<PostList, ApiError>;

    /// Root post and all replies of a thread.
    async fn get_post_thread(&self, post_id: &str) -> Result<PostList, ApiError>;

    /// Mark `channel_id` as viewed, leaving `prev_channel_id`.
    async fn view_channel(&self, channel_id: &str, prev_channel_id: &str) -> Result<(), ApiError>;
}
