//! Chat database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for chats table
#[derive(Debug, Clone, FromRow)]
pub struct ChatModel {
    pub chat_id: i64,
    pub group_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// A chat with its display name for one viewer
#[derive(Debug, Clone, FromRow)]
pub struct ChatSummaryModel {
    pub chat_id: i64,
    pub display_name: String,
}
