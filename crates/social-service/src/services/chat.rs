//! Chat queries
//!
//! Listing a user's chats, reading a chat's history, and the participant
//! checks the realtime gateway relies on.

use std::collections::HashSet;

use social_core::entities::{ChatSummary, Message};
use social_core::value_objects::{ChatId, UserId};
use social_core::DomainError;
use tracing::instrument;

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::unread::UnreadTracker;

/// Chat service
pub struct ChatService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ChatService<'a> {
    /// Create a new ChatService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Chats the user participates in, named for that user
    #[instrument(skip(self))]
    pub async fn chats(&self, user_id: UserId) -> ServiceResult<Vec<ChatSummary>> {
        Ok(self.ctx.chat_repo().summaries_for_user(user_id).await?)
    }

    /// Full history of a chat, oldest first. Reading it clears the
    /// user's unread marker for the chat.
    #[instrument(skip(self))]
    pub async fn messages(&self, user_id: UserId, chat_id: ChatId) -> ServiceResult<Vec<Message>> {
        self.ctx
            .chat_repo()
            .find_by_id(chat_id)
            .await?
            .ok_or(DomainError::ChatNotFound(chat_id))?;

        self.ensure_participant(user_id, chat_id).await?;

        let messages = self.ctx.message_repo().find_by_chat(chat_id).await?;
        UnreadTracker::new(self.ctx).clear(user_id, chat_id).await?;

        Ok(messages)
    }

    /// Chats holding messages the user has not read
    #[instrument(skip(self))]
    pub async fn unread_chat_ids(&self, user_id: UserId) -> ServiceResult<Vec<ChatId>> {
        UnreadTracker::new(self.ctx).unread_chat_ids(user_id).await
    }

    /// Whether the user may send to and listen on the chat
    #[instrument(skip(self))]
    pub async fn is_participant(&self, user_id: UserId, chat_id: ChatId) -> ServiceResult<bool> {
        Ok(self.ctx.chat_repo().is_participant(chat_id, user_id).await?)
    }

    /// Users currently participating in the chat
    #[instrument(skip(self))]
    pub async fn participant_ids(&self, chat_id: ChatId) -> ServiceResult<HashSet<UserId>> {
        Ok(self.ctx.chat_repo().participant_ids(chat_id).await?.into_iter().collect())
    }

    async fn ensure_participant(&self, user_id: UserId, chat_id: ChatId) -> ServiceResult<()> {
        if self.is_participant(user_id, chat_id).await? {
            Ok(())
        } else {
            Err(DomainError::NotChatParticipant.into())
        }
    }
}
