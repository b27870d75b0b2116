//! Notification database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for notifications table
#[derive(Debug, Clone, FromRow)]
pub struct NotificationModel {
    pub notification_id: i64,
    pub user_id: i64,
    #[sqlx(rename = "type")]
    pub notification_type: String,
    pub message: String,
    pub status: String,
    pub reference_id: i64,
    pub second_reference_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// The columns the relationship engine reads inside its transaction
#[derive(Debug, Clone, FromRow)]
pub struct NotificationReferenceModel {
    #[sqlx(rename = "type")]
    pub notification_type: String,
    pub reference_id: i64,
    pub second_reference_id: Option<i64>,
}
