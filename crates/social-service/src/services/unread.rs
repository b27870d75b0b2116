//! Unread tracker
//!
//! A (user, chat) marker exists exactly while that user has messages in the
//! chat they have not fetched yet.

use social_core::value_objects::{ChatId, UserId};
use tracing::instrument;

use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct UnreadTracker<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UnreadTracker<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Reset the chat's markers to every participant except `sender`
    #[instrument(skip(self))]
    pub async fn mark_all_unread(&self, chat_id: ChatId, sender: UserId) -> ServiceResult<()> {
        self.ctx.unread_repo().mark_all_unread(chat_id, sender).await?;
        Ok(())
    }

    /// The user has seen the chat
    #[instrument(skip(self))]
    pub async fn clear(&self, user_id: UserId, chat_id: ChatId) -> ServiceResult<()> {
        self.ctx.unread_repo().clear(user_id, chat_id).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn unread_chat_ids(&self, user_id: UserId) -> ServiceResult<Vec<ChatId>> {
        Ok(self.ctx.unread_repo().unread_chat_ids(user_id).await?)
    }
}
