//! Push notification payload delivered by the platform when the user taps a notification.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushNotification {
    pub data: NotificationData,
    /// Anything else the platform attached (message text, badge, ...).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationData {
    pub channel_id: String,
    /// Absent for direct and group messages, which belong to no team.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl PushNotification {
    pub fn new(channel_id: impl Into<String>, team_id: Option<String>) -> Self {
        Self {
            data: NotificationData {
                channel_id: channel_id.into(),
                team_id,
                extra: serde_json::Map::new(),
            },
            extra: serde_json::Map::new(),
        }
    }

    pub fn channel_id(&self) -> &str {
        &self.data.channel_id
    }

    /// Team id carried by the payload; empty strings count as absent.
    pub fn team_id(&self) -> Option<&str> {
        self.data.team_id.as_deref().filter(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_payload_without_team() {
        let n: PushNotification = serde_json::from_value(json!({
            "data": {"channel_id": "dm1", "post_id": "p1", "type": "message"},
            "message": "hello"
        }))
        .unwrap();
        assert_eq!(n.channel_id(), "dm1");
        assert_eq!(n.team_id(), None);
        assert_eq!(n.data.extra["post_id"], "p1");
        assert_eq!(n.extra["message"], "hello");
    }

    #[test]
    fn empty_team_id_is_absent() {
        let n = PushNotification::new("c1", Some(String::new()));
        assert_eq!(n.team_id(), None);
    }
}
