//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in social-core.
//! Each repository handles database operations for a specific domain entity.

mod chat;
mod error;
mod follow;
mod group;
mod message;
mod notification;
mod queries;
mod relationship;
mod session;
mod unread;
mod user;

pub use chat::PgChatRepository;
pub use follow::PgFollowRepository;
pub use group::PgGroupRepository;
pub use message::PgMessageRepository;
pub use notification::PgNotificationRepository;
pub use relationship::{PgRelationshipStore, PgRelationshipTx};
pub use session::PgSessionRepository;
pub use unread::PgUnreadRepository;
pub use user::PgUserRepository;
