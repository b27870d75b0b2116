//! Frames exchanged over the persistent connections

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use social_core::entities::{NewMessage, NotificationStatus};
use social_core::value_objects::{ChatId, NotificationId, UserId};

/// Chat channel frame, client → server and server → chat listeners
///
/// Missing `sender_id` or `content` parse as unset so the pipeline can
/// ignore the message instead of treating it as malformed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessagePayload {
    pub chat_id: ChatId,
    #[serde(default)]
    pub sender_id: UserId,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
}

impl From<ChatMessagePayload> for NewMessage {
    fn from(payload: ChatMessagePayload) -> Self {
        NewMessage::new(payload.chat_id, payload.sender_id, payload.content).with_emoji(payload.emoji)
    }
}

/// One pushed notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationPayload {
    pub notification_id: NotificationId,
    pub user_id: UserId,
    #[serde(rename = "type")]
    pub notification_type: String,
    pub message: String,
    pub status: NotificationStatus,
    pub reference_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Notification channel frame, client → server
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum NotificationClientMessage {
    NotificationResponse {
        notification_id: NotificationId,
        accepted: bool,
    },
}
