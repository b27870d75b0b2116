//! PostgreSQL implementation of RelationshipStore
//!
//! Each [`PgRelationshipTx`] wraps one database transaction. Dropping it
//! without calling `commit` rolls the transaction back.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::instrument;

use social_core::entities::{FollowStatus, MemberStatus, NotificationStatus};
use social_core::traits::{NotificationReference, RelationshipStore, RelationshipTx, RepoResult};
use social_core::value_objects::{ChatId, GroupId, NotificationId, UserId};

use crate::models::NotificationReferenceModel;

use super::error::map_db_error;
use super::queries;

/// Opens relationship transactions on the pool
#[derive(Clone)]
pub struct PgRelationshipStore {
    pool: PgPool,
}

impl PgRelationshipStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RelationshipStore for PgRelationshipStore {
    async fn begin(&self) -> RepoResult<Box<dyn RelationshipTx>> {
        let tx = self.pool.begin().await.map_err(map_db_error)?;
        Ok(Box::new(PgRelationshipTx { tx }))
    }
}

pub struct PgRelationshipTx {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl RelationshipTx for PgRelationshipTx {
    #[instrument(skip(self))]
    async fn set_notification_status(
        &mut self,
        owner: UserId,
        id: NotificationId,
        status: NotificationStatus,
    ) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE notifications SET status = $3
            WHERE notification_id = $1 AND user_id = $2
            ",
        )
        .bind(id.into_inner())
        .bind(owner.into_inner())
        .bind(status.as_str())
        .execute(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn notification_reference(&mut self, id: NotificationId) -> RepoResult<Option<NotificationReference>> {
        let result = sqlx::query_as::<_, NotificationReferenceModel>(
            r"
            SELECT type, reference_id, second_reference_id
            FROM notifications
            WHERE notification_id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(NotificationReference::from))
    }

    #[instrument(skip(self))]
    async fn set_follow_status(&mut self, follower: UserId, following: UserId, status: FollowStatus) -> RepoResult<()> {
        sqlx::query(
            r"
            UPDATE follows SET status = $3, updated_at = NOW()
            WHERE follower_id = $1 AND following_id = $2
            ",
        )
        .bind(follower.into_inner())
        .bind(following.into_inner())
        .bind(status.as_str())
        .execute(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn upsert_follow(&mut self, follower: UserId, following: UserId, status: FollowStatus) -> RepoResult<()> {
        queries::upsert_follow(&mut *self.tx, follower, following, status.as_str()).await
    }

    #[instrument(skip(self))]
    async fn find_direct_chat(&mut self, user_a: UserId, user_b: UserId) -> RepoResult<Option<ChatId>> {
        queries::find_direct_chat(&mut *self.tx, user_a, user_b).await
    }

    #[instrument(skip(self))]
    async fn create_direct_chat(&mut self, user_a: UserId, user_b: UserId) -> RepoResult<ChatId> {
        queries::create_direct_chat(&mut *self.tx, user_a, user_b).await
    }

    #[instrument(skip(self))]
    async fn set_member_status(&mut self, group_id: GroupId, user_id: UserId, status: MemberStatus) -> RepoResult<()> {
        queries::set_member_status(&mut *self.tx, group_id, user_id, status.as_str()).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn group_chat_id(&mut self, group_id: GroupId) -> RepoResult<Option<ChatId>> {
        queries::group_chat_id(&mut *self.tx, group_id).await
    }

    #[instrument(skip(self))]
    async fn add_participant(&mut self, chat_id: ChatId, user_id: UserId) -> RepoResult<()> {
        queries::add_participant(&mut *self.tx, chat_id, user_id).await
    }

    async fn commit(self: Box<Self>) -> RepoResult<()> {
        self.tx.commit().await.map_err(map_db_error)
    }
}
