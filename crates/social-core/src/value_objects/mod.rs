//! Value objects - immutable types that represent domain concepts

mod ids;

pub use ids::{ChatId, GroupId, IdParseError, MessageId, NotificationId, UserId};
