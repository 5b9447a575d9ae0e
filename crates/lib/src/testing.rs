//! In-memory `ChatApi` for unit tests: records calls and fails on demand.

use crate::api::{
    ApiError, ChatApi, ClientConfig, ClientLicense, Post, PostList, Team, TeamMember,
};
use crate::store::Action;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use tokio::sync::broadcast;

#[derive(Default)]
pub struct MockApi {
    pub teams: Vec<Team>,
    pub members: Vec<TeamMember>,
    pub search_results: PostList,
    pub thread: PostList,
    pub fail_config: bool,
    pub hang_license: bool,
    pub fail_teams: bool,
    pub fail_create: bool,
    pub fail_search: bool,
    /// Number of `get_posts` calls that fail before one succeeds.
    pub post_failures: AtomicU32,
    pub calls: Mutex<Vec<String>>,
    pub created: Mutex<Vec<Post>>,
}

impl MockApi {
    pub fn with_post_failures(self, n: u32) -> Self {
        self.post_failures.store(n, Ordering::SeqCst);
        self
    }

    pub fn count(&self, name: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.as_str() == name)
            .count()
    }

    /// Posts as they were sent to `create_post`.
    pub fn created(&self) -> Vec<Post> {
        self.created.lock().unwrap().clone()
    }

    fn record(&self, name: &str) {
        self.calls.lock().unwrap().push(name.to_string());
    }
}

fn failure(message: &str) -> ApiError {
    ApiError::Api {
        status: 500,
        message: message.to_string(),
    }
}

#[async_trait]
impl ChatApi for MockApi {
    async fn get_client_config(&self) -> Result<ClientConfig, ApiError> {
        self.record("get_client_config");
        if self.fail_config {
            return Err(failure("config unavailable"));
        }
        Ok(HashMap::from([("SiteName".to_string(), "Parley".to_string())]))
    }

    async fn get_license_config(&self) -> Result<ClientLicense, ApiError> {
        self.record("get_license_config");
        if self.hang_license {
            return std::future::pending().await;
        }
        Ok(HashMap::from([("IsLicensed".to_string(), "false".to_string())]))
    }

    async fn get_my_teams(&self) -> Result<Vec<Team>, ApiError> {
        self.record("get_my_teams");
        if self.fail_teams {
            return Err(failure("teams unavailable"));
        }
        Ok(self.teams.clone())
    }

    async fn get_my_team_members(&self) -> Result<Vec<TeamMember>, ApiError> {
        self.record("get_my_team_members");
        if self.fail_teams {
            return Err(failure("members unavailable"));
        }
        Ok(self.members.clone())
    }

    async fn get_posts(&self, channel_id: &str) -> Result<PostList, ApiError> {
        self.record("get_posts");
        let remaining = self.post_failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.post_failures.store(remaining - 1, Ordering::SeqCst);
            return Err(failure("posts unavailable"));
        }
        let post = Post {
            id: format!("{}-latest", channel_id),
            channel_id: channel_id.to_string(),
            ..Default::default()
        };
        Ok(PostList {
            order: vec![post.id.clone()],
            posts: HashMap::from([(post.id.clone(), post)]),
        })
    }

    async fn create_post(&self, post: &Post) -> Result<Post, ApiError> {
        self.record("create_post");
        self.created.lock().unwrap().push(post.clone());
        if self.fail_create {
            return Err(ApiError::Api {
                status: 400,
                message: "invalid post".to_string(),
            });
        }
        let pending = post.pending_post_id.clone().unwrap_or_default();
        Ok(Post {
            id: format!("srv-{}", pending),
            create_at: post.update_at,
            ..post.clone()
        })
    }

    async fn search_posts(
        &self,
        _team_id: &str,
        _terms: &str,
        _is_or_search: bool,
    ) -> Result<PostList, ApiError> {
        self.record("search_posts");
        if self.fail_search {
            return Err(failure("search unavailable"));
        }
        Ok(self.search_results.clone())
    }

    async fn get_post_thread(&self, _post_id: &str) -> Result<PostList, ApiError> {
        self.record("get_post_thread");
        Ok(self.thread.clone())
    }

    async fn view_channel(&self, _channel_id: &str, _prev_channel_id: &str) -> Result<(), ApiError> {
        self.record("view_channel");
        Ok(())
    }
}

/// Every action already sent on the subscription.
pub fn drain(rx: &mut broadcast::Receiver<Action>) -> Vec<Action> {
    let mut out = Vec::new();
    while let Ok(a) = rx.try_recv() {
        out.push(a);
    }
    out
}
