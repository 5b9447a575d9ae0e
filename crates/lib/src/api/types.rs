//! Server entity payloads (posts, teams, memberships, config, license).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Client config as returned by `GET /config/client?format=old`: flat string map.
pub type ClientConfig = HashMap<String, String>;

/// Client license as returned by `GET /license/client?format=old`: flat string map.
pub type ClientLicense = HashMap<String, String>;

/// A post. Unknown server fields (props, hashtags, ...) are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub channel_id: String,
    #[serde(default)]
    pub user_id: String,
    /// Id of the thread root; empty for root posts.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub root_id: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub create_at: i64,
    #[serde(default)]
    pub update_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_post_id: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Post {
    /// Draft for a new post in a channel.
    pub fn draft(channel_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            channel_id: channel_id.into(),
            message: message.into(),
            ..Default::default()
        }
    }

    /// Id of the thread this post belongs to: its root, or itself when it is a root post.
    pub fn thread_root_id(&self) -> &str {
        if self.root_id.is_empty() {
            &self.id
        } else {
            &self.root_id
        }
    }
}

/// `{ order, posts }` as returned by post list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostList {
    #[serde(default)]
    pub order: Vec<String>,
    #[serde(default)]
    pub posts: HashMap<String, Post>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub display_name: String,
}

/// Membership of the current user in a team.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub team_id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub roles: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct SearchRequest<'a> {
    pub terms: &'a str,
    pub is_or_search: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct ViewChannelRequest<'a> {
    pub channel_id: &'a str,
    pub prev_channel_id: &'a str,
}

/// Error body the server sends with non-2xx responses.
#[derive(Debug, Deserialize)]
pub(crate) struct ServerErrorBody {
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn post_keeps_unknown_fields() {
        let post: Post = serde_json::from_value(json!({
            "id": "p1",
            "channel_id": "c1",
            "message": "hi",
            "props": {"from_webhook": "true"}
        }))
        .unwrap();
        assert_eq!(post.extra.get("props"), Some(&json!({"from_webhook": "true"})));
        let back = serde_json::to_value(&post).unwrap();
        assert_eq!(back["props"]["from_webhook"], "true");
        assert!(back.get("root_id").is_none());
    }

    #[test]
    fn thread_root_id_prefers_root() {
        let mut post = Post::draft("c1", "reply");
        post.id = "p2".into();
        assert_eq!(post.thread_root_id(), "p2");
        post.root_id = "p1".into();
        assert_eq!(post.thread_root_id(), "p1");
    }
}
