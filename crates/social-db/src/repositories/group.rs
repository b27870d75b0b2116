//! PostgreSQL implementation of GroupRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use social_core::entities::{Group, MemberStatus, NewGroup};
use social_core::traits::{GroupRepository, RepoResult};
use social_core::value_objects::{ChatId, GroupId, UserId};

use crate::models::GroupModel;

use super::error::{group_not_found, map_db_error, map_fk_violation, user_not_found};
use super::queries;

/// PostgreSQL implementation of GroupRepository
#[derive(Clone)]
pub struct PgGroupRepository {
    pool: PgPool,
}

impl PgGroupRepository {
    /// Create a new PgGroupRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GroupRepository for PgGroupRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: GroupId) -> RepoResult<Option<Group>> {
        let result = sqlx::query_as::<_, GroupModel>(
            r"
            SELECT group_id, owner_id, title, description, created_at
            FROM groups
            WHERE group_id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Group::from))
    }

    #[instrument(skip(self, group), fields(owner_id = %group.owner_id))]
    async fn create_with_chat(&self, group: &NewGroup) -> RepoResult<Group> {
        let owner_id = group.owner_id;
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let created = sqlx::query_as::<_, GroupModel>(
            r"
            INSERT INTO groups (owner_id, title, description)
            VALUES ($1, $2, $3)
            RETURNING group_id, owner_id, title, description, created_at
            ",
        )
        .bind(owner_id.into_inner())
        .bind(&group.title)
        .bind(&group.description)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_fk_violation(e, || user_not_found(owner_id)))?;

        let chat_id = sqlx::query_scalar::<_, i64>(
            r"
            INSERT INTO chats (group_id)
            VALUES ($1)
            RETURNING chat_id
            ",
        )
        .bind(created.group_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        queries::add_participant(&mut *tx, ChatId::new(chat_id), owner_id).await?;

        sqlx::query(
            r"
            INSERT INTO group_members (group_id, user_id, status)
            VALUES ($1, $2, 'accepted')
            ",
        )
        .bind(created.group_id)
        .bind(owner_id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(Group::from(created))
    }

    #[instrument(skip(self))]
    async fn member_status(&self, group_id: GroupId, user_id: UserId) -> RepoResult<Option<MemberStatus>> {
        let status = sqlx::query_scalar::<_, String>(
            r"
            SELECT status FROM group_members
            WHERE group_id = $1 AND user_id = $2
            ",
        )
        .bind(group_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        status.map(|s| s.parse()).transpose()
    }

    #[instrument(skip(self))]
    async fn upsert_member(&self, group_id: GroupId, user_id: UserId, status: MemberStatus) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO group_members (group_id, user_id, status)
            VALUES ($1, $2, $3)
            ON CONFLICT (group_id, user_id)
            DO UPDATE SET status = EXCLUDED.status, updated_at = NOW()
            ",
        )
        .bind(group_id.into_inner())
        .bind(user_id.into_inner())
        .bind(status.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| map_fk_violation(e, || group_not_found(group_id)))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn accepted_member_ids(&self, group_id: GroupId) -> RepoResult<Vec<UserId>> {
        let ids = sqlx::query_scalar::<_, i64>(
            r"
            SELECT user_id FROM group_members
            WHERE group_id = $1 AND status = 'accepted'
            ORDER BY user_id
            ",
        )
        .bind(group_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(ids.into_iter().map(UserId::new).collect())
    }

    #[instrument(skip(self))]
    async fn leave(&self, group_id: GroupId, user_id: UserId) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        queries::set_member_status(&mut *tx, group_id, user_id, MemberStatus::Rejected.as_str()).await?;

        sqlx::query(
            r"
            DELETE FROM chat_participants
            WHERE participant_id = $2
              AND chat_id = (SELECT chat_id FROM chats WHERE group_id = $1)
            ",
        )
        .bind(group_id.into_inner())
        .bind(user_id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        sqlx::query(
            r"
            DELETE FROM unread_messages
            WHERE user_id = $2
              AND chat_id = (SELECT chat_id FROM chats WHERE group_id = $1)
            ",
        )
        .bind(group_id.into_inner())
        .bind(user_id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }
}
