//! Notification creation and per-connection polling

use chrono::{DateTime, Utc};
use social_core::entities::{NewNotification, Notification};
use social_core::value_objects::UserId;
use tracing::{debug, instrument};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Newest `created_at` already delivered to one connection
///
/// Starts empty, meaning "every unread notification". It only moves
/// forward, and only when a non-empty batch is observed.
///
/// The next poll asks for rows with `created_at` strictly greater than the
/// checkpoint. A notification stamped with the same instant as the newest
/// one already delivered, or one whose transaction commits after a later
/// stamped row was polled, is therefore not pushed on this connection. It
/// stays unread and shows up again when the client reconnects with a fresh
/// checkpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotificationCheckpoint {
    since: Option<DateTime<Utc>>,
}

impl NotificationCheckpoint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn since(&self) -> Option<DateTime<Utc>> {
        self.since
    }

    /// Move past the newest notification of `batch`
    pub fn advance(&mut self, batch: &[Notification]) {
        if let Some(newest) = batch.iter().map(|n| n.created_at).max() {
            if self.since.map_or(true, |current| newest > current) {
                self.since = Some(newest);
            }
        }
    }
}

/// Notification service
pub struct NotificationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> NotificationService<'a> {
    /// Create a new NotificationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Store a notification and wake the recipient's pollers
    #[instrument(skip(self, notification), fields(user_id = %notification.user_id, kind = notification.kind.type_name()))]
    pub async fn notify(&self, notification: NewNotification) -> ServiceResult<Notification> {
        let created = self.ctx.notification_repo().create(&notification).await?;
        self.ctx.notification_hub().publish(created.user_id);
        debug!(notification_id = %created.id, "Notification created");
        Ok(created)
    }

    /// Unread notifications newer than the checkpoint, oldest first.
    ///
    /// Delivery is at-least-once: nothing here changes a notification's
    /// status, so a fresh checkpoint sees still-unread items again.
    #[instrument(skip(self, checkpoint))]
    pub async fn poll(
        &self,
        user_id: UserId,
        checkpoint: &mut NotificationCheckpoint,
    ) -> ServiceResult<Vec<Notification>> {
        let batch = self
            .ctx
            .notification_repo()
            .find_unread_since(user_id, checkpoint.since())
            .await?;
        checkpoint.advance(&batch);
        Ok(batch)
    }
}
