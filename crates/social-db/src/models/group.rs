//! Group database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for groups table
#[derive(Debug, Clone, FromRow)]
pub struct GroupModel {
    pub group_id: i64,
    pub owner_id: i64,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}
