//! PostgreSQL implementation of ChatRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use social_core::entities::{Chat, ChatSummary};
use social_core::traits::{ChatRepository, RepoResult};
use social_core::value_objects::{ChatId, GroupId, UserId};

use crate::mappers::direct_pair;
use crate::models::{ChatModel, ChatSummaryModel};

use super::error::map_db_error;
use super::queries;

/// PostgreSQL implementation of ChatRepository
#[derive(Clone)]
pub struct PgChatRepository {
    pool: PgPool,
}

impl PgChatRepository {
    /// Create a new PgChatRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChatRepository for PgChatRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ChatId) -> RepoResult<Option<Chat>> {
        let result = sqlx::query_as::<_, ChatModel>(
            r"
            SELECT chat_id, group_id, created_at
            FROM chats
            WHERE chat_id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Chat::from))
    }

    #[instrument(skip(self))]
    async fn find_direct(&self, user_a: UserId, user_b: UserId) -> RepoResult<Option<ChatId>> {
        let mut conn = self.pool.acquire().await.map_err(map_db_error)?;
        queries::find_direct_chat(&mut conn, user_a, user_b).await
    }

    #[instrument(skip(self))]
    async fn delete_direct(&self, user_a: UserId, user_b: UserId) -> RepoResult<Option<ChatId>> {
        let (low, high) = direct_pair(user_a, user_b);
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let chat_id = sqlx::query_scalar::<_, i64>(
            r"
            SELECT chat_id FROM chats
            WHERE group_id IS NULL AND direct_user_low = $1 AND direct_user_high = $2
            FOR UPDATE
            ",
        )
        .bind(low)
        .bind(high)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let Some(chat_id) = chat_id else {
            return Ok(None);
        };

        for statement in [
            "DELETE FROM unread_messages WHERE chat_id = $1",
            "DELETE FROM messages WHERE chat_id = $1",
            "DELETE FROM chat_participants WHERE chat_id = $1",
            "DELETE FROM chats WHERE chat_id = $1",
        ] {
            sqlx::query(statement)
                .bind(chat_id)
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(Some(ChatId::new(chat_id)))
    }

    #[instrument(skip(self))]
    async fn find_by_group(&self, group_id: GroupId) -> RepoResult<Option<Chat>> {
        let result = sqlx::query_as::<_, ChatModel>(
            r"
            SELECT chat_id, group_id, created_at
            FROM chats
            WHERE group_id = $1
            ",
        )
        .bind(group_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Chat::from))
    }

    #[instrument(skip(self))]
    async fn participant_ids(&self, chat_id: ChatId) -> RepoResult<Vec<UserId>> {
        let ids = sqlx::query_scalar::<_, i64>(
            r"
            SELECT participant_id FROM chat_participants
            WHERE chat_id = $1
            ORDER BY participant_id
            ",
        )
        .bind(chat_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(ids.into_iter().map(UserId::new).collect())
    }

    #[instrument(skip(self))]
    async fn is_participant(&self, chat_id: ChatId, user_id: UserId) -> RepoResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(
                SELECT 1 FROM chat_participants
                WHERE chat_id = $1 AND participant_id = $2
            )
            ",
        )
        .bind(chat_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(exists)
    }

    #[instrument(skip(self))]
    async fn summaries_for_user(&self, user_id: UserId) -> RepoResult<Vec<ChatSummary>> {
        // Group chats show the group title, one-on-one chats the other user's name
        let results = sqlx::query_as::<_, ChatSummaryModel>(
            r"
            SELECT c.chat_id,
                   CASE
                       WHEN c.group_id IS NOT NULL THEN g.title
                       ELSE other.firstname || ' ' || other.lastname
                   END AS display_name
            FROM chat_participants cp
            JOIN chats c ON c.chat_id = cp.chat_id
            LEFT JOIN groups g ON g.group_id = c.group_id
            LEFT JOIN users other ON c.group_id IS NULL
                AND other.user_id = CASE
                    WHEN c.direct_user_low = $1 THEN c.direct_user_high
                    ELSE c.direct_user_low
                END
            WHERE cp.participant_id = $1
            ORDER BY c.chat_id
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(ChatSummary::from).collect())
    }
}
