//! App-level actions: startup config, push notification handling, posting, offline purge.

use super::{set_channel_display_name, ActionResult, Dispatcher};
use crate::api::{ApiError, ClientConfig, ClientLicense, Post};
use crate::notification::PushNotification;
use crate::store::{Action, SessionSnapshot};
use serde::Serialize;
use std::collections::HashMap;
use tokio::task::JoinHandle;

/// Client config and license fetched together at startup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigAndLicense {
    pub config: ClientConfig,
    pub license: ClientLicense,
}

/// Side effects started by [`Dispatcher::load_from_push_notification`] and left running.
///
/// The router never awaits these. Callers may drop the handles; awaiting them only tells
/// when the team switch or channel selection has been applied.
#[derive(Debug, Default)]
pub struct PendingIntents {
    pub team_switch: Option<JoinHandle<()>>,
    pub channel_select: Option<JoinHandle<()>>,
}

/// Team a notification belongs to. DMs and GMs carry no team and stay on the current one.
pub fn resolve_team_id(notification: &PushNotification, session: &SessionSnapshot) -> String {
    notification
        .team_id()
        .map(str::to_string)
        .unwrap_or_else(|| session.current_team_id.clone())
}

/// Id a post is known by until the server assigns one.
pub fn pending_post_id(user_id: &str, timestamp: i64) -> String {
    format!("{}:{}", user_id, timestamp)
}

/// Reset every offline-cached entity.
pub fn purge_offline_store() -> Action {
    Action::OfflineStorePurge
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

impl Dispatcher {
    /// Fetch client config and license concurrently. Either failure is returned as is.
    pub async fn load_config_and_license(&self) -> Result<ConfigAndLicense, ApiError> {
        let (config, license) =
            tokio::try_join!(self.get_client_config(), self.get_license_config())?;
        Ok(ConfigAndLicense { config, license })
    }

    /// Bring the client to the channel a tapped notification points at.
    ///
    /// Loads teams and memberships first when the target team is unknown locally. A team
    /// switch and a channel selection are spawned and not awaited; see [`PendingIntents`].
    pub async fn load_from_push_notification(
        &self,
        notification: &PushNotification,
        session: &SessionSnapshot,
    ) -> Result<PendingIntents, ApiError> {
        let channel_id = notification.channel_id();
        let team_id = resolve_team_id(notification, session);

        if !team_id.is_empty()
            && (!session.teams.contains_key(&team_id)
                || !session.my_team_members.contains_key(&team_id))
        {
            log::debug!("team {} not loaded, fetching teams and memberships", team_id);
            tokio::try_join!(self.get_my_teams(), self.get_my_team_members())?;
        }

        let mut pending = PendingIntents::default();

        if team_id != session.current_team_id {
            let this = self.clone();
            let team_id = team_id.clone();
            pending.team_switch = Some(tokio::spawn(async move {
                this.select_team(&team_id).await;
            }));
        }

        if channel_id == session.current_channel_id {
            if let Err(e) = self.get_posts_with_retry(channel_id).await {
                log::warn!("refreshing posts for notification channel {}: {}", channel_id, e);
            }
        } else {
            self.store.dispatch(set_channel_display_name("")).await;
            let this = self.clone();
            let channel_id = channel_id.to_string();
            pending.channel_select = Some(tokio::spawn(async move {
                if let Err(e) = this.select_channel(&channel_id).await {
                    log::warn!("selecting notification channel {}: {}", channel_id, e);
                }
            }));
        }

        Ok(pending)
    }

    /// Submit a post stamped with the current time.
    pub async fn create_post(&self, post: Post) -> ActionResult<bool> {
        self.create_post_at(post, now_millis()).await
    }

    /// Submit a post stamped with `timestamp` (ms). The server always receives `create_at = 0`.
    ///
    /// On failure nothing is dispatched and the pending post is dropped.
    pub async fn create_post_at(&self, post: Post, timestamp: i64) -> ActionResult<bool> {
        let current_user_id = self.store.current_user_id().await;
        let pending_id = post
            .pending_post_id
            .clone()
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| pending_post_id(&current_user_id, timestamp));

        let new_post = Post {
            pending_post_id: Some(pending_id),
            create_at: timestamp,
            update_at: timestamp,
            ..post
        };

        let payload = match self
            .api
            .create_post(&Post {
                create_at: 0,
                ..new_post
            })
            .await
        {
            Ok(p) => p,
            Err(e) => {
                log::warn!("creating post failed: {}", e);
                return ActionResult::Error(e.to_string());
            }
        };

        self.store
            .dispatch(Action::ReceivedPosts {
                channel_id: payload.channel_id.clone(),
                order: Vec::new(),
                posts: HashMap::from([(payload.id.clone(), payload)]),
            })
            .await;
        ActionResult::Data(true)
    }
}
