//! Post search, recent search terms and thread loading.

use super::Dispatcher;
use crate::api::ApiError;
use crate::store::Action;

pub fn clear_search() -> Action {
    Action::ClearSearch
}

pub fn handle_search_draft_changed(value: impl Into<String>) -> Action {
    Action::SearchDraftChanged(value.into())
}

pub fn remove_search_terms(team_id: impl Into<String>, terms: impl Into<String>) -> Action {
    Action::RemoveSearchTerms {
        team_id: team_id.into(),
        terms: terms.into(),
    }
}

pub fn select_post(post_id: impl Into<String>) -> Action {
    Action::SelectPost(post_id.into())
}

impl Dispatcher {
    /// Search a team's posts. Results land in the store; the terms are remembered as a recent search.
    pub async fn search_posts(
        &self,
        team_id: &str,
        terms: &str,
        is_or_search: bool,
    ) -> Result<(), ApiError> {
        self.store.dispatch(Action::SearchPostsRequest).await;
        let list = match self.api.search_posts(team_id, terms, is_or_search).await {
            Ok(list) => list,
            Err(e) => {
                log::warn!("search {:?} in team {} failed: {}", terms, team_id, e);
                self.store
                    .dispatch(Action::SearchPostsFailure(e.to_string()))
                    .await;
                return Err(e);
            }
        };
        log::debug!("search {:?} returned {} posts", terms, list.order.len());

        self.store
            .dispatch(Action::ReceivedPostsOnly(list.posts))
            .await;
        self.store
            .dispatch(Action::SearchPostsSuccess { order: list.order })
            .await;
        self.store
            .dispatch(Action::ReceivedSearchTerm {
                team_id: team_id.to_string(),
                terms: terms.to_string(),
                is_or_search,
            })
            .await;
        Ok(())
    }

    /// Fetch a thread unless its root post is already in the store.
    pub async fn load_thread_if_necessary(
        &self,
        root_id: &str,
        channel_id: &str,
    ) -> Result<(), ApiError> {
        if self.store.has_post(root_id).await {
            return Ok(());
        }
        log::debug!("loading thread {} of channel {}", root_id, channel_id);
        let list = self.api.get_post_thread(root_id).await?;
        self.store
            .dispatch(Action::ReceivedPostsOnly(list.posts))
            .await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Post, PostList};
    use crate::config::RetryPolicy;
    use crate::store::{RequestStatus, Store};
    use crate::testing::MockApi;
    use std::collections::HashMap;
    use std::sync::Arc;

    fn post(id: &str, channel: &str) -> Post {
        Post {
            id: id.into(),
            channel_id: channel.into(),
            ..Default::default()
        }
    }

    fn page(channel: &str, posts: Vec<Post>) -> Action {
        Action::ReceivedPosts {
            channel_id: channel.into(),
            order: posts.iter().map(|p| p.id.clone()).collect(),
            posts: posts.into_iter().map(|p| (p.id.clone(), p)).collect(),
        }
    }

    fn results() -> PostList {
        PostList {
            order: vec!["p2".into(), "p1".into()],
            posts: HashMap::from([
                ("p1".to_string(), post("p1", "c1")),
                ("p2".to_string(), post("p2", "c2")),
            ]),
        }
    }

    #[tokio::test]
    async fn search_stores_results_and_recent_terms() {
        let api = Arc::new(MockApi {
            search_results: results(),
            ..Default::default()
        });
        let store = Store::new();
        let d = Dispatcher::new(api, store.clone(), RetryPolicy::default());

        d.search_posts("t1", "release notes", true).await.unwrap();
        let state = store.state().await;
        assert_eq!(state.entities.search.status, RequestStatus::Success);
        assert_eq!(state.entities.search.results, vec!["p2", "p1"]);
        assert!(state.entities.posts.posts.contains_key("p1"));
        assert!(state.entities.posts.posts.contains_key("p2"));
        let recent = state.recent_searches("t1");
        assert_eq!(recent[0].terms, "release notes");
        assert!(recent[0].is_or_search);
    }

    #[tokio::test]
    async fn old_search_hit_keeps_channel_order() {
        let old = Post {
            create_at: 1,
            ..post("old", "c1")
        };
        let api = Arc::new(MockApi {
            search_results: PostList {
                order: vec!["old".into()],
                posts: HashMap::from([("old".to_string(), old)]),
            },
            ..Default::default()
        });
        let store = Store::new();
        let p3 = Post {
            create_at: 30,
            ..post("p3", "c1")
        };
        let p2 = Post {
            create_at: 20,
            ..post("p2", "c1")
        };
        store.dispatch(page("c1", vec![p3, p2])).await;
        let d = Dispatcher::new(api, store.clone(), RetryPolicy::default());

        d.search_posts("t1", "old", false).await.unwrap();
        let state = store.state().await;
        assert_eq!(state.entities.posts.posts_in_channel["c1"], vec!["p3", "p2"]);
        assert_eq!(state.entities.search.results, vec!["old"]);
        assert!(state.entities.posts.posts.contains_key("old"));
    }

    #[tokio::test]
    async fn search_failure_sets_failure_status() {
        let api = Arc::new(MockApi {
            fail_search: true,
            ..Default::default()
        });
        let store = Store::new();
        let d = Dispatcher::new(api, store.clone(), RetryPolicy::default());
        assert!(d.search_posts("t1", "x", false).await.is_err());
        let state = store.state().await;
        assert_eq!(state.entities.search.status, RequestStatus::Failure);
        assert!(state.recent_searches("t1").is_empty());
    }

    #[tokio::test]
    async fn thread_loaded_only_when_root_missing() {
        let api = Arc::new(MockApi {
            thread: results(),
            ..Default::default()
        });
        let store = Store::new();
        store.dispatch(page("c1", vec![post("p9", "c1")])).await;
        let d = Dispatcher::new(api.clone(), store.clone(), RetryPolicy::default());

        d.load_thread_if_necessary("p1", "c1").await.unwrap();
        d.load_thread_if_necessary("p1", "c1").await.unwrap();
        assert_eq!(api.count("get_post_thread"), 1);
        let state = store.state().await;
        assert_eq!(state.entities.posts.posts_in_channel["c1"], vec!["p9"]);
    }
}
