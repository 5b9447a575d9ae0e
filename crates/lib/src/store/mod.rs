//! Client-side entity store.
//!
//! State changes only through [`Store::dispatch`], which applies the reducer and then
//! broadcasts the action to subscribers (UI, persistence, tests).

mod action;
mod persist;
mod state;

pub use action::Action;
pub use persist::{load_snapshot, save_snapshot};
pub use state::{
    Entities, GeneralState, PostsState, RecentSearch, RequestStatus, SearchState, SessionSnapshot,
    State, TeamsState, Views,
};

use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

const EVENT_CAPACITY: usize = 256;

/// Shared store handle; clones point at the same state.
#[derive(Clone)]
pub struct Store {
    inner: Arc<RwLock<State>>,
    events: broadcast::Sender<Action>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    pub fn new() -> Self {
        Self::with_state(State::default())
    }

    pub fn with_state(state: State) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: Arc::new(RwLock::new(state)),
            events,
        }
    }

    /// Apply the action, then notify subscribers.
    pub async fn dispatch(&self, action: Action) {
        log::debug!("dispatch {}", action.name());
        self.inner.write().await.reduce(&action);
        // No subscribers is fine.
        let _ = self.events.send(action);
    }

    /// Receive every action dispatched after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<Action> {
        self.events.subscribe()
    }

    /// Clone of the current state.
    pub async fn state(&self) -> State {
        self.inner.read().await.clone()
    }

    pub async fn session(&self) -> SessionSnapshot {
        self.inner.read().await.session()
    }

    pub async fn current_user_id(&self) -> String {
        self.inner.read().await.entities.current_user_id.clone()
    }

    pub async fn has_post(&self, post_id: &str) -> bool {
        self.inner
            .read()
            .await
            .entities
            .posts
            .posts
            .contains_key(post_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn dispatch_applies_then_broadcasts() {
        let store = Store::new();
        let mut rx = store.subscribe();
        store.dispatch(Action::SelectChannel("c1".into())).await;
        assert_eq!(rx.recv().await.unwrap(), Action::SelectChannel("c1".into()));
        assert_eq!(store.session().await.current_channel_id, "c1");
    }

    #[tokio::test]
    async fn clones_share_state() {
        let store = Store::new();
        let other = store.clone();
        other.dispatch(Action::ReceivedCurrentUserId("u1".into())).await;
        assert_eq!(store.current_user_id().await, "u1");
    }
}
