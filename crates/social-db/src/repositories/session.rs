//! PostgreSQL implementation of SessionRepository

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::instrument;

use social_core::traits::{RepoResult, SessionRepository};
use social_core::value_objects::UserId;

use crate::models::SessionModel;

use super::error::map_db_error;

/// Looks up sessions created by the login collaborator
#[derive(Clone)]
pub struct PgSessionRepository {
    pool: PgPool,
}

impl PgSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PgSessionRepository {
    #[instrument(skip(self, token))]
    async fn find_user_by_token(&self, token: &str) -> RepoResult<Option<UserId>> {
        if token.is_empty() {
            return Ok(None);
        }

        let session = sqlx::query_as::<_, SessionModel>(
            r"
            SELECT session_key, user_id, expires_at
            FROM sessions
            WHERE session_key = $1
            ",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        let now = Utc::now();
        Ok(session
            .filter(|s| s.expires_at.map_or(true, |expires| expires > now))
            .map(|s| UserId::new(s.user_id)))
    }
}
