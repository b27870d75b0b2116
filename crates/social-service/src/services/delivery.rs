//! Chat delivery pipeline
//!
//! validate → persist → reset unread markers. Broadcasting the accepted
//! payload is left to the caller, which owns the live connections; it must
//! only happen after [`ChatDeliveryService::deliver`] returns
//! [`Delivery::Delivered`].

use social_core::entities::{Message, NewMessage};
use social_core::value_objects::UserId;
use tracing::{debug, instrument, warn};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::unread::UnreadTracker;

/// Why an inbound message was dropped without an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    EmptyContent,
    MissingSender,
    /// The payload names a sender other than the connection's user
    SenderMismatch,
    NotParticipant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Ignored(IgnoreReason),
    Delivered(Message),
}

pub struct ChatDeliveryService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ChatDeliveryService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Run one inbound message through the pipeline.
    ///
    /// Invalid messages come back as [`Delivery::Ignored`]. A persistence
    /// failure is returned as an error and nothing may be broadcast. Once the
    /// message is stored, a failure to update unread markers is logged and
    /// the message still counts as delivered.
    #[instrument(skip(self, message), fields(chat_id = %message.chat_id))]
    pub async fn deliver(&self, session_user: UserId, message: NewMessage) -> ServiceResult<Delivery> {
        if let Some(reason) = self.rejection(session_user, &message).await? {
            debug!(?reason, "Inbound chat message ignored");
            return Ok(Delivery::Ignored(reason));
        }

        let stored = self.ctx.message_repo().create(&message).await?;

        if let Err(e) = UnreadTracker::new(self.ctx)
            .mark_all_unread(stored.chat_id, stored.sender_id)
            .await
        {
            warn!(message_id = %stored.id, error = %e, "Failed to update unread markers");
        }

        Ok(Delivery::Delivered(stored))
    }

    async fn rejection(&self, session_user: UserId, message: &NewMessage) -> ServiceResult<Option<IgnoreReason>> {
        if message.sender_id.is_unset() {
            return Ok(Some(IgnoreReason::MissingSender));
        }
        if message.content.is_empty() {
            return Ok(Some(IgnoreReason::EmptyContent));
        }
        if message.sender_id != session_user {
            return Ok(Some(IgnoreReason::SenderMismatch));
        }
        if !self
            .ctx
            .chat_repo()
            .is_participant(message.chat_id, message.sender_id)
            .await?
        {
            return Ok(Some(IgnoreReason::NotParticipant));
        }
        Ok(None)
    }
}
