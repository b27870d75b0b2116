//! PostgreSQL implementation of UnreadRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use social_core::traits::{RepoResult, UnreadRepository};
use social_core::value_objects::{ChatId, UserId};

use super::error::map_db_error;

/// Per-(user, chat) unread markers
#[derive(Clone)]
pub struct PgUnreadRepository {
    pool: PgPool,
}

impl PgUnreadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UnreadRepository for PgUnreadRepository {
    #[instrument(skip(self))]
    async fn mark_all_unread(&self, chat_id: ChatId, excluded: UserId) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query("DELETE FROM unread_messages WHERE chat_id = $1")
            .bind(chat_id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO unread_messages (user_id, chat_id)
            SELECT participant_id, chat_id FROM chat_participants
            WHERE chat_id = $1 AND participant_id <> $2
            ",
        )
        .bind(chat_id.into_inner())
        .bind(excluded.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn clear(&self, user_id: UserId, chat_id: ChatId) -> RepoResult<()> {
        sqlx::query("DELETE FROM unread_messages WHERE user_id = $1 AND chat_id = $2")
            .bind(user_id.into_inner())
            .bind(chat_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn unread_chat_ids(&self, user_id: UserId) -> RepoResult<Vec<ChatId>> {
        let ids = sqlx::query_scalar::<_, i64>(
            r"
            SELECT chat_id FROM unread_messages
            WHERE user_id = $1
            ORDER BY chat_id
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(ids.into_iter().map(ChatId::new).collect())
    }
}
