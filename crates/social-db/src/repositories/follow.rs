//! PostgreSQL implementation of FollowRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use social_core::entities::{Follow, FollowStatus, User};
use social_core::traits::{FollowRepository, RepoResult};
use social_core::value_objects::UserId;

use crate::models::{FollowModel, UserModel};

use super::error::map_db_error;
use super::queries;

/// PostgreSQL implementation of FollowRepository
#[derive(Clone)]
pub struct PgFollowRepository {
    pool: PgPool,
}

impl PgFollowRepository {
    /// Create a new PgFollowRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FollowRepository for PgFollowRepository {
    #[instrument(skip(self))]
    async fn find(&self, follower: UserId, following: UserId) -> RepoResult<Option<Follow>> {
        let result = sqlx::query_as::<_, FollowModel>(
            r"
            SELECT follower_id, following_id, status
            FROM follows
            WHERE follower_id = $1 AND following_id = $2
            ",
        )
        .bind(follower.into_inner())
        .bind(following.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Follow::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn upsert_status(&self, follower: UserId, following: UserId, status: FollowStatus) -> RepoResult<()> {
        let mut conn = self.pool.acquire().await.map_err(map_db_error)?;
        queries::upsert_follow(&mut conn, follower, following, status.as_str()).await
    }

    #[instrument(skip(self))]
    async fn update_status(&self, follower: UserId, following: UserId, status: FollowStatus) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE follows SET status = $3, updated_at = NOW()
            WHERE follower_id = $1 AND following_id = $2
            ",
        )
        .bind(follower.into_inner())
        .bind(following.into_inner())
        .bind(status.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn followers(&self, user: UserId) -> RepoResult<Vec<User>> {
        let results = sqlx::query_as::<_, UserModel>(
            r"
            SELECT u.user_id, u.firstname, u.lastname, u.profile_public
            FROM follows f
            JOIN users u ON u.user_id = f.follower_id
            WHERE f.following_id = $1 AND f.status = 'accepted'
            ORDER BY u.lastname, u.firstname
            ",
        )
        .bind(user.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(User::from).collect())
    }

    #[instrument(skip(self))]
    async fn following(&self, user: UserId) -> RepoResult<Vec<User>> {
        let results = sqlx::query_as::<_, UserModel>(
            r"
            SELECT u.user_id, u.firstname, u.lastname, u.profile_public
            FROM follows f
            JOIN users u ON u.user_id = f.following_id
            WHERE f.follower_id = $1 AND f.status = 'accepted'
            ORDER BY u.lastname, u.firstname
            ",
        )
        .bind(user.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(User::from).collect())
    }
}
