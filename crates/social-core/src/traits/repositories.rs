//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Plain repositories run each call as its own
//! statement sequence; multi-statement atomic work goes through
//! [`RelationshipStore`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{
    Chat, ChatSummary, Follow, FollowStatus, Group, MemberStatus, Message, NewGroup, NewMessage,
    NewNotification, Notification, NotificationKind, NotificationStatus, User,
};
use crate::error::DomainError;
use crate::value_objects::{ChatId, GroupId, NotificationId, UserId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User / Session Repositories (read-only collaborators)
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>>;
}

#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Resolve an opaque session token to its user, `None` if invalid or expired
    async fn find_user_by_token(&self, token: &str) -> RepoResult<Option<UserId>>;
}

// ============================================================================
// Follow Repository
// ============================================================================

#[async_trait]
pub trait FollowRepository: Send + Sync {
    /// Find the follow row for an ordered pair
    async fn find(&self, follower: UserId, following: UserId) -> RepoResult<Option<Follow>>;

    /// Insert the pair or overwrite its status
    async fn upsert_status(&self, follower: UserId, following: UserId, status: FollowStatus) -> RepoResult<()>;

    /// Update an existing pair; returns false when no row exists
    async fn update_status(&self, follower: UserId, following: UserId, status: FollowStatus) -> RepoResult<bool>;

    /// Users with an accepted follow towards `user`
    async fn followers(&self, user: UserId) -> RepoResult<Vec<User>>;

    /// Users `user` follows with an accepted status
    async fn following(&self, user: UserId) -> RepoResult<Vec<User>>;
}

// ============================================================================
// Chat Repository
// ============================================================================

#[async_trait]
pub trait ChatRepository: Send + Sync {
    /// Find chat by ID
    async fn find_by_id(&self, id: ChatId) -> RepoResult<Option<Chat>>;

    /// Find the one-on-one chat shared by two users
    async fn find_direct(&self, user_a: UserId, user_b: UserId) -> RepoResult<Option<ChatId>>;

    /// Delete the one-on-one chat shared by two users, with its messages,
    /// participants and unread markers. Returns the deleted chat, if any.
    async fn delete_direct(&self, user_a: UserId, user_b: UserId) -> RepoResult<Option<ChatId>>;

    /// Find the chat owned by a group
    async fn find_by_group(&self, group_id: GroupId) -> RepoResult<Option<Chat>>;

    /// List participant IDs of a chat
    async fn participant_ids(&self, chat_id: ChatId) -> RepoResult<Vec<UserId>>;

    /// Check chat membership
    async fn is_participant(&self, chat_id: ChatId, user_id: UserId) -> RepoResult<bool>;

    /// Chats the user participates in, with display names
    async fn summaries_for_user(&self, user_id: UserId) -> RepoResult<Vec<ChatSummary>>;
}

// ============================================================================
// Message Repository
// ============================================================================

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Persist a message and return it with its assigned id and timestamp
    async fn create(&self, message: &NewMessage) -> RepoResult<Message>;

    /// All messages of a chat, oldest first
    async fn find_by_chat(&self, chat_id: ChatId) -> RepoResult<Vec<Message>>;
}

// ============================================================================
// Unread Repository
// ============================================================================

#[async_trait]
pub trait UnreadRepository: Send + Sync {
    /// Replace every marker of the chat with one per participant except `excluded`
    async fn mark_all_unread(&self, chat_id: ChatId, excluded: UserId) -> RepoResult<()>;

    /// Remove the marker for one (user, chat) pair
    async fn clear(&self, user_id: UserId, chat_id: ChatId) -> RepoResult<()>;

    /// Chats with a marker for the user
    async fn unread_chat_ids(&self, user_id: UserId) -> RepoResult<Vec<ChatId>>;
}

// ============================================================================
// Group Repository
// ============================================================================

#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// Find group by ID
    async fn find_by_id(&self, id: GroupId) -> RepoResult<Option<Group>>;

    /// Create the group, its chat (owner as sole participant) and the
    /// owner's accepted membership in one unit
    async fn create_with_chat(&self, group: &NewGroup) -> RepoResult<Group>;

    /// Membership status of a user
    async fn member_status(&self, group_id: GroupId, user_id: UserId) -> RepoResult<Option<MemberStatus>>;

    /// Insert the membership or overwrite its status
    async fn upsert_member(&self, group_id: GroupId, user_id: UserId, status: MemberStatus) -> RepoResult<()>;

    /// IDs of accepted members
    async fn accepted_member_ids(&self, group_id: GroupId) -> RepoResult<Vec<UserId>>;

    /// Mark the membership rejected and remove the user from the group chat
    async fn leave(&self, group_id: GroupId, user_id: UserId) -> RepoResult<()>;
}

// ============================================================================
// Notification Repository
// ============================================================================

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Store a new unread notification
    async fn create(&self, notification: &NewNotification) -> RepoResult<Notification>;

    /// Unread notifications of a user created strictly after `since`
    /// (all unread when `since` is `None`), oldest first
    async fn find_unread_since(
        &self,
        user_id: UserId,
        since: Option<DateTime<Utc>>,
    ) -> RepoResult<Vec<Notification>>;
}

// ============================================================================
// Relationship Store (transactional)
// ============================================================================

/// Raw reference columns of a stored notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationReference {
    pub type_name: String,
    pub reference_id: i64,
    pub second_reference_id: Option<i64>,
}

impl NotificationReference {
    /// Decoded kind; `None` means the row carries no resolvable cascade
    pub fn kind(&self) -> Option<NotificationKind> {
        NotificationKind::decode(&self.type_name, self.reference_id, self.second_reference_id)
    }
}

/// Opens atomic units of relationship work
#[async_trait]
pub trait RelationshipStore: Send + Sync {
    /// Begin a transaction
    async fn begin(&self) -> RepoResult<Box<dyn RelationshipTx>>;
}

/// One open transaction.
///
/// Every change made through it becomes visible only on [`commit`]. Dropping
/// the transaction without committing discards all of its changes.
///
/// [`commit`]: RelationshipTx::commit
#[async_trait]
pub trait RelationshipTx: Send {
    /// Set the status of a notification owned by `owner`; false when no
    /// notification with that id belongs to `owner`
    async fn set_notification_status(
        &mut self,
        owner: UserId,
        id: NotificationId,
        status: NotificationStatus,
    ) -> RepoResult<bool>;

    /// Read the type and reference columns of a notification
    async fn notification_reference(&mut self, id: NotificationId) -> RepoResult<Option<NotificationReference>>;

    /// Update an existing follow row (no insert)
    async fn set_follow_status(&mut self, follower: UserId, following: UserId, status: FollowStatus) -> RepoResult<()>;

    /// Insert the follow row or overwrite its status
    async fn upsert_follow(&mut self, follower: UserId, following: UserId, status: FollowStatus) -> RepoResult<()>;

    /// The one-on-one chat shared by two users
    async fn find_direct_chat(&mut self, user_a: UserId, user_b: UserId) -> RepoResult<Option<ChatId>>;

    /// Create a one-on-one chat with exactly these two participants
    async fn create_direct_chat(&mut self, user_a: UserId, user_b: UserId) -> RepoResult<ChatId>;

    /// Update an existing membership row (no insert)
    async fn set_member_status(&mut self, group_id: GroupId, user_id: UserId, status: MemberStatus) -> RepoResult<()>;

    /// The chat owned by a group
    async fn group_chat_id(&mut self, group_id: GroupId) -> RepoResult<Option<ChatId>>;

    /// Add a chat participant; no-op if already present
    async fn add_participant(&mut self, chat_id: ChatId, user_id: UserId) -> RepoResult<()>;

    /// Make every change durable
    async fn commit(self: Box<Self>) -> RepoResult<()>;
}
