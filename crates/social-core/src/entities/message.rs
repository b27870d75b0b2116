//! Message entity - a persisted chat message

use chrono::{DateTime, Utc};

use crate::value_objects::{ChatId, MessageId, UserId};

/// Message entity; immutable once persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub chat_id: ChatId,
    pub sender_id: UserId,
    pub content: String,
    pub emoji: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A message accepted for persistence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub chat_id: ChatId,
    pub sender_id: UserId,
    pub content: String,
    pub emoji: Option<String>,
}

impl NewMessage {
    pub fn new(chat_id: ChatId, sender_id: UserId, content: impl Into<String>) -> Self {
        Self {
            chat_id,
            sender_id,
            content: content.into(),
            emoji: None,
        }
    }

    pub fn with_emoji(mut self, emoji: Option<String>) -> Self {
        self.emoji = emoji;
        self
    }

    /// Messages with no content or no sender are never persisted
    pub fn is_deliverable(&self) -> bool {
        !self.content.is_empty() && !self.sender_id.is_unset()
    }
}
