//! Domain entities - core business objects

mod chat;
mod follow;
mod group;
mod message;
mod notification;
mod user;

pub use chat::{Chat, ChatSummary};
pub use follow::{Follow, FollowStatus};
pub use group::{Group, GroupMember, MemberStatus, NewGroup};
pub use message::{Message, NewMessage};
pub use notification::{NewNotification, Notification, NotificationKind, NotificationStatus};
pub use user::User;
