//! Database models - SQLx-compatible structs for PostgreSQL tables

mod chat;
mod follow;
mod group;
mod message;
mod notification;
mod user;

pub use chat::{ChatModel, ChatSummaryModel};
pub use follow::FollowModel;
pub use group::GroupModel;
pub use message::MessageModel;
pub use notification::{NotificationModel, NotificationReferenceModel};
pub use user::{SessionModel, UserModel};
