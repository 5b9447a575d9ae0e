//! Channel selection and post loading.

use super::Dispatcher;
use crate::api::ApiError;
use crate::store::Action;
use std::time::Duration;

/// Title shown in the channel header. An empty name hides the previous channel's title during a switch.
pub fn set_channel_display_name(name: impl Into<String>) -> Action {
    Action::SetChannelDisplayName(name.into())
}

impl Dispatcher {
    /// Fetch the first page of a channel's posts and store it.
    pub async fn get_posts(&self, channel_id: &str) -> Result<(), ApiError> {
        let list = self.api.get_posts(channel_id).await?;
        self.store
            .dispatch(Action::ReceivedPosts {
                channel_id: channel_id.to_string(),
                order: list.order,
                posts: list.posts,
            })
            .await;
        Ok(())
    }

    /// [`get_posts`](Self::get_posts) under the retry policy. Flags the channel view as failed
    /// when every attempt fails and returns the last error.
    pub async fn get_posts_with_retry(&self, channel_id: &str) -> Result<(), ApiError> {
        let attempts = self.retry.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match self.get_posts(channel_id).await {
                Ok(()) => {
                    self.store
                        .dispatch(Action::SetChannelRetryFailed(false))
                        .await;
                    return Ok(());
                }
                Err(e) if attempt < attempts => {
                    log::warn!(
                        "loading posts for {} failed (attempt {}/{}): {}",
                        channel_id,
                        attempt,
                        attempts,
                        e
                    );
                    tokio::time::sleep(Duration::from_millis(self.retry.delay_ms)).await;
                    attempt += 1;
                }
                Err(e) => {
                    log::warn!(
                        "loading posts for {} failed after {} attempts: {}",
                        channel_id,
                        attempts,
                        e
                    );
                    self.store
                        .dispatch(Action::SetChannelRetryFailed(true))
                        .await;
                    return Err(e);
                }
            }
        }
    }

    /// Switch to a channel and load its posts.
    pub async fn select_channel(&self, channel_id: &str) -> Result<(), ApiError> {
        log::info!("selecting channel {}", channel_id);
        self.store
            .dispatch(Action::SelectChannel(channel_id.to_string()))
            .await;
        self.store.dispatch(Action::SetChannelLoading(true)).await;
        let res = self.get_posts_with_retry(channel_id).await;
        self.store.dispatch(Action::SetChannelLoading(false)).await;
        res
    }

    pub async fn mark_channel_viewed(
        &self,
        channel_id: &str,
        prev_channel_id: &str,
    ) -> Result<(), ApiError> {
        self.api.view_channel(channel_id, prev_channel_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RetryPolicy;
    use crate::store::Store;
    use crate::testing::MockApi;
    use std::sync::Arc;

    fn dispatcher(api: Arc<MockApi>, max_attempts: u32) -> Dispatcher {
        Dispatcher::new(
            api,
            Store::new(),
            RetryPolicy {
                max_attempts,
                delay_ms: 1,
            },
        )
    }

    #[tokio::test]
    async fn retry_recovers_after_transient_failures() {
        let api = Arc::new(MockApi::default().with_post_failures(2));
        let d = dispatcher(api.clone(), 3);
        d.get_posts_with_retry("c1").await.unwrap();
        assert_eq!(api.count("get_posts"), 3);
        let state = d.store().state().await;
        assert!(!state.views.channel_retry_failed);
        assert!(state.entities.posts.posts_in_channel.contains_key("c1"));
    }

    #[tokio::test]
    async fn retry_gives_up_and_flags_failure() {
        let api = Arc::new(MockApi::default().with_post_failures(10));
        let d = dispatcher(api.clone(), 2);
        assert!(d.get_posts_with_retry("c1").await.is_err());
        assert_eq!(api.count("get_posts"), 2);
        assert!(d.store().state().await.views.channel_retry_failed);
    }

    #[tokio::test]
    async fn select_channel_sets_current_and_clears_loading() {
        let api = Arc::new(MockApi::default());
        let d = dispatcher(api.clone(), 1);
        d.select_channel("c2").await.unwrap();
        let state = d.store().state().await;
        assert_eq!(state.entities.current_channel_id, "c2");
        assert!(!state.views.channel_loading);
        assert_eq!(api.count("get_posts"), 1);
    }
}
