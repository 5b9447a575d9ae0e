//! Action creators: coordinate server calls and dispatch their results into the store.
//!
//! Every creator that needs the network is a method on [`Dispatcher`]; creators that only
//! describe an intent are free functions returning an [`Action`](crate::store::Action).

mod channel;
mod general;
mod root;
mod search;
mod teams;

pub use channel::set_channel_display_name;
pub use root::{pending_post_id, purge_offline_store, resolve_team_id, ConfigAndLicense, PendingIntents};
pub use search::{clear_search, handle_search_draft_changed, remove_search_terms, select_post};

use crate::api::ChatApi;
use crate::config::RetryPolicy;
use crate::store::Store;
use serde::Serialize;
use std::sync::Arc;

/// Outcome of an action that recovers from its own errors: serialises to `{"data": ..}` or `{"error": ".."}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionResult<T> {
    Data(T),
    Error(String),
}

impl<T> ActionResult<T> {
    pub fn is_ok(&self) -> bool {
        matches!(self, ActionResult::Data(_))
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ActionResult::Error(e) => Some(e),
            ActionResult::Data(_) => None,
        }
    }
}

/// Server API, store and retry policy shared by all action creators. Cheap to clone.
#[derive(Clone)]
pub struct Dispatcher {
    api: Arc<dyn ChatApi>,
    store: Store,
    retry: RetryPolicy,
}

impl Dispatcher {
    pub fn new(api: Arc<dyn ChatApi>, store: Store, retry: RetryPolicy) -> Self {
        Self { api, store, retry }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn action_result_shape() {
        let ok: ActionResult<bool> = ActionResult::Data(true);
        assert_eq!(serde_json::to_value(&ok).unwrap(), json!({"data": true}));
        let err: ActionResult<bool> = ActionResult::Error("boom".into());
        assert_eq!(serde_json::to_value(&err).unwrap(), json!({"error": "boom"}));
        assert_eq!(err.error(), Some("boom"));
        assert!(!err.is_ok());
    }
}
