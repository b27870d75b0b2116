//! User and session database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for users table (columns read by this system)
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub user_id: i64,
    pub firstname: String,
    pub lastname: String,
    pub profile_public: bool,
}

/// Database model for sessions table
#[derive(Debug, Clone, FromRow)]
pub struct SessionModel {
    pub session_key: String,
    pub user_id: i64,
    pub expires_at: Option<DateTime<Utc>>,
}
