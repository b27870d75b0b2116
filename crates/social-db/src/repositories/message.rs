//! PostgreSQL implementation of MessageRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use social_core::entities::{Message, NewMessage};
use social_core::traits::{MessageRepository, RepoResult};
use social_core::value_objects::ChatId;

use crate::models::MessageModel;

use super::error::{chat_not_found, map_fk_violation, map_db_error};

/// PostgreSQL implementation of MessageRepository
#[derive(Clone)]
pub struct PgMessageRepository {
    pool: PgPool,
}

impl PgMessageRepository {
    /// Create a new PgMessageRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for PgMessageRepository {
    #[instrument(skip(self, message), fields(chat_id = %message.chat_id, sender_id = %message.sender_id))]
    async fn create(&self, message: &NewMessage) -> RepoResult<Message> {
        let chat_id = message.chat_id;
        let result = sqlx::query_as::<_, MessageModel>(
            r"
            INSERT INTO messages (chat_id, sender_id, content, emoji)
            VALUES ($1, $2, $3, $4)
            RETURNING message_id, chat_id, sender_id, content, emoji, created_at
            ",
        )
        .bind(chat_id.into_inner())
        .bind(message.sender_id.into_inner())
        .bind(&message.content)
        .bind(&message.emoji)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_fk_violation(e, || chat_not_found(chat_id)))?;

        Ok(Message::from(result))
    }

    #[instrument(skip(self))]
    async fn find_by_chat(&self, chat_id: ChatId) -> RepoResult<Vec<Message>> {
        let results = sqlx::query_as::<_, MessageModel>(
            r"
            SELECT message_id, chat_id, sender_id, content, emoji, created_at
            FROM messages
            WHERE chat_id = $1
            ORDER BY created_at ASC, message_id ASC
            ",
        )
        .bind(chat_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Message::from).collect())
    }
}
