//! Chat entity - a conversation, either one-on-one or group-linked

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::value_objects::{ChatId, GroupId};

/// Chat entity
///
/// A chat without a group link has exactly the two participants of a
/// one-on-one relationship. A group-linked chat is owned by its group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chat {
    pub id: ChatId,
    pub group_id: Option<GroupId>,
    pub created_at: DateTime<Utc>,
}

impl Chat {
    #[inline]
    pub fn is_one_on_one(&self) -> bool {
        self.group_id.is_none()
    }
}

/// A chat as listed for one participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatSummary {
    pub chat_id: ChatId,
    /// Group title, or the other participant's full name
    #[serde(rename = "full_name")]
    pub display_name: String,
}
