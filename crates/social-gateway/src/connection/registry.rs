//! Chat registry
//!
//! Maps each chat to the chat sockets listening on it, using DashMap for
//! thread-safe access. Each listener remembers its user so a broadcast can
//! evict connections whose user has since left the chat.

use std::collections::{HashMap, HashSet};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use social_core::value_objects::{ChatId, UserId};

use super::{ConnectionId, Outbound, OutboundError};

#[derive(Debug)]
struct Listener {
    user_id: UserId,
    outbound: Outbound,
}

/// Live chat listeners
#[derive(Debug, Default)]
pub struct ChatRegistry {
    chats: DashMap<ChatId, HashMap<ConnectionId, Listener>>,
}

impl ChatRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a user's connection to a chat. Returns false if it was already registered.
    pub fn register(&self, chat_id: ChatId, user_id: UserId, outbound: &Outbound) -> bool {
        let mut listeners = self.chats.entry(chat_id).or_default();
        if listeners.contains_key(&outbound.id()) {
            return false;
        }
        listeners.insert(
            outbound.id(),
            Listener {
                user_id,
                outbound: outbound.clone(),
            },
        );

        tracing::trace!(chat_id = %chat_id, user_id = %user_id, connection_id = %outbound.id(), "Connection registered for chat");
        true
    }

    /// Queue a frame for every connection on the chat whose user is in
    /// `participants`. Listeners of any other user are unregistered.
    ///
    /// Best-effort: a full or closed queue is logged and skipped. Returns how
    /// many connections accepted the frame.
    pub fn broadcast(&self, chat_id: ChatId, text: &str, participants: &HashSet<UserId>) -> usize {
        let Entry::Occupied(mut entry) = self.chats.entry(chat_id) else {
            return 0;
        };

        entry.get_mut().retain(|connection_id, listener| {
            let keep = participants.contains(&listener.user_id);
            if !keep {
                tracing::debug!(chat_id = %chat_id, user_id = %listener.user_id, connection_id = %connection_id, "Evicting listener no longer in chat");
            }
            keep
        });

        let mut delivered = 0;
        for (connection_id, listener) in entry.get() {
            match listener.outbound.try_send(text) {
                Ok(()) => delivered += 1,
                Err(OutboundError::Full) => {
                    tracing::warn!(chat_id = %chat_id, connection_id = %connection_id, "Outbound queue full, frame dropped");
                }
                Err(OutboundError::Closed) => {
                    tracing::debug!(chat_id = %chat_id, connection_id = %connection_id, "Skipping closed connection");
                }
            }
        }

        if entry.get().is_empty() {
            entry.remove();
        }
        delivered
    }

    /// Remove a connection from the given chats, dropping chats left without listeners
    pub fn unregister_connection(&self, connection_id: ConnectionId, chat_ids: impl IntoIterator<Item = ChatId>) {
        for chat_id in chat_ids {
            if let Entry::Occupied(mut entry) = self.chats.entry(chat_id) {
                entry.get_mut().remove(&connection_id);
                if entry.get().is_empty() {
                    entry.remove();
                }
            }
        }

        tracing::trace!(connection_id = %connection_id, "Connection unregistered");
    }

    /// Number of connections listening on a chat
    pub fn listener_count(&self, chat_id: ChatId) -> usize {
        self.chats.get(&chat_id).map_or(0, |listeners| listeners.len())
    }

    /// Number of chats with at least one listener
    pub fn chat_count(&self) -> usize {
        self.chats.len()
    }
}
