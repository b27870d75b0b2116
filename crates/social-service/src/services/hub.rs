//! Process-local wakeups for notification pollers
//!
//! Every new notification bumps a per-user counter. Pollers of that user
//! hold a [`watch::Receiver`] and re-query the store as soon as the counter
//! changes instead of waiting for their next interval tick.

use dashmap::DashMap;
use social_core::value_objects::UserId;
use tokio::sync::watch;
use tracing::trace;

/// Per-user wakeup channels
#[derive(Debug, Default)]
pub struct NotificationHub {
    channels: DashMap<UserId, watch::Sender<u64>>,
}

impl NotificationHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Receiver that changes whenever a notification is created for `user_id`
    pub fn subscribe(&self, user_id: UserId) -> watch::Receiver<u64> {
        self.channels
            .entry(user_id)
            .or_insert_with(|| watch::channel(0).0)
            .subscribe()
    }

    /// Wake every poller of `user_id`; a no-op when nobody is connected
    pub fn publish(&self, user_id: UserId) {
        if let Some(sender) = self.channels.get(&user_id) {
            sender.send_modify(|version| *version = version.wrapping_add(1));
            trace!(user_id = %user_id, receivers = sender.receiver_count(), "Notification wakeup sent");
        }
    }

    /// Drop the user's channel once its last receiver is gone
    pub fn release(&self, user_id: UserId) {
        self.channels
            .remove_if(&user_id, |_, sender| sender.receiver_count() == 0);
    }

    /// Number of users with a live channel
    pub fn user_count(&self) -> usize {
        self.channels.len()
    }
}
