//! # social-core
//!
//! Domain layer containing entities, typed identifiers, and repository traits
//! for the relationship and messaging core.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Chat, ChatSummary, Follow, FollowStatus, Group, GroupMember, MemberStatus, Message,
    NewGroup, NewMessage, NewNotification, Notification, NotificationKind, NotificationStatus,
    User,
};
pub use error::DomainError;
pub use traits::{
    ChatRepository, FollowRepository, GroupRepository, MessageRepository,
    NotificationReference, NotificationRepository, RelationshipStore, RelationshipTx,
    RepoResult, SessionRepository, UnreadRepository, UserRepository,
};
pub use value_objects::{ChatId, GroupId, IdParseError, MessageId, NotificationId, UserId};
