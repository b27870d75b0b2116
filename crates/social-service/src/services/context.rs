//! Service context - dependency container for services
//!
//! Holds all repositories, the relationship store and the notification hub
//! needed by services.

use std::sync::Arc;

use social_core::traits::{
    ChatRepository, FollowRepository, GroupRepository, MessageRepository, NotificationRepository,
    RelationshipStore, SessionRepository, UnreadRepository, UserRepository,
};

use super::error::{ServiceError, ServiceResult};
use super::hub::NotificationHub;

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// Every dependency is a trait object so services run unchanged against
/// PostgreSQL or in-memory implementations.
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    user_repo: Arc<dyn UserRepository>,
    session_repo: Arc<dyn SessionRepository>,
    follow_repo: Arc<dyn FollowRepository>,
    chat_repo: Arc<dyn ChatRepository>,
    message_repo: Arc<dyn MessageRepository>,
    unread_repo: Arc<dyn UnreadRepository>,
    group_repo: Arc<dyn GroupRepository>,
    notification_repo: Arc<dyn NotificationRepository>,

    // Transactions
    relationship_store: Arc<dyn RelationshipStore>,

    // Realtime
    notification_hub: Arc<NotificationHub>,
}

impl ServiceContext {
    /// Start building a context
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the session repository
    pub fn session_repo(&self) -> &dyn SessionRepository {
        self.session_repo.as_ref()
    }

    /// Get the follow repository
    pub fn follow_repo(&self) -> &dyn FollowRepository {
        self.follow_repo.as_ref()
    }

    /// Get the chat repository
    pub fn chat_repo(&self) -> &dyn ChatRepository {
        self.chat_repo.as_ref()
    }

    /// Get the message repository
    pub fn message_repo(&self) -> &dyn MessageRepository {
        self.message_repo.as_ref()
    }

    /// Get the unread marker repository
    pub fn unread_repo(&self) -> &dyn UnreadRepository {
        self.unread_repo.as_ref()
    }

    /// Get the group repository
    pub fn group_repo(&self) -> &dyn GroupRepository {
        self.group_repo.as_ref()
    }

    /// Get the notification repository
    pub fn notification_repo(&self) -> &dyn NotificationRepository {
        self.notification_repo.as_ref()
    }

    // === Transactions ===

    /// Get the store that opens relationship transactions
    pub fn relationship_store(&self) -> &dyn RelationshipStore {
        self.relationship_store.as_ref()
    }

    // === Realtime ===

    /// Get the notification hub
    pub fn notification_hub(&self) -> &NotificationHub {
        self.notification_hub.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("relationship_store", &"...")
            .field("notification_hub", &self.notification_hub)
            .finish()
    }
}

/// Builder for creating ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    session_repo: Option<Arc<dyn SessionRepository>>,
    follow_repo: Option<Arc<dyn FollowRepository>>,
    chat_repo: Option<Arc<dyn ChatRepository>>,
    message_repo: Option<Arc<dyn MessageRepository>>,
    unread_repo: Option<Arc<dyn UnreadRepository>>,
    group_repo: Option<Arc<dyn GroupRepository>>,
    notification_repo: Option<Arc<dyn NotificationRepository>>,
    relationship_store: Option<Arc<dyn RelationshipStore>>,
    notification_hub: Option<Arc<NotificationHub>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn session_repo(mut self, repo: Arc<dyn SessionRepository>) -> Self {
        self.session_repo = Some(repo);
        self
    }

    pub fn follow_repo(mut self, repo: Arc<dyn FollowRepository>) -> Self {
        self.follow_repo = Some(repo);
        self
    }

    pub fn chat_repo(mut self, repo: Arc<dyn ChatRepository>) -> Self {
        self.chat_repo = Some(repo);
        self
    }

    pub fn message_repo(mut self, repo: Arc<dyn MessageRepository>) -> Self {
        self.message_repo = Some(repo);
        self
    }

    pub fn unread_repo(mut self, repo: Arc<dyn UnreadRepository>) -> Self {
        self.unread_repo = Some(repo);
        self
    }

    pub fn group_repo(mut self, repo: Arc<dyn GroupRepository>) -> Self {
        self.group_repo = Some(repo);
        self
    }

    pub fn notification_repo(mut self, repo: Arc<dyn NotificationRepository>) -> Self {
        self.notification_repo = Some(repo);
        self
    }

    pub fn relationship_store(mut self, store: Arc<dyn RelationshipStore>) -> Self {
        self.relationship_store = Some(store);
        self
    }

    /// Share an existing hub; a fresh one is created otherwise
    pub fn notification_hub(mut self, hub: Arc<NotificationHub>) -> Self {
        self.notification_hub = Some(hub);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext {
            user_repo: self.user_repo.ok_or_else(|| missing("user_repo"))?,
            session_repo: self.session_repo.ok_or_else(|| missing("session_repo"))?,
            follow_repo: self.follow_repo.ok_or_else(|| missing("follow_repo"))?,
            chat_repo: self.chat_repo.ok_or_else(|| missing("chat_repo"))?,
            message_repo: self.message_repo.ok_or_else(|| missing("message_repo"))?,
            unread_repo: self.unread_repo.ok_or_else(|| missing("unread_repo"))?,
            group_repo: self.group_repo.ok_or_else(|| missing("group_repo"))?,
            notification_repo: self.notification_repo.ok_or_else(|| missing("notification_repo"))?,
            relationship_store: self.relationship_store.ok_or_else(|| missing("relationship_store"))?,
            notification_hub: self.notification_hub.unwrap_or_default(),
        })
    }
}

fn missing(dependency: &str) -> ServiceError {
    ServiceError::validation(format!("{dependency} is required"))
}
