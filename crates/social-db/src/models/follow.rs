//! Follow database model

use sqlx::FromRow;

/// Database model for follows table
#[derive(Debug, Clone, FromRow)]
pub struct FollowModel {
    pub follower_id: i64,
    pub following_id: i64,
    pub status: String,
}
