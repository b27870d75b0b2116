//! Notification entity and its closed set of kinds
//!
//! Storage keeps a type name plus two loosely typed reference columns whose
//! meaning depends on the type. `NotificationKind` is the decoded form: each
//! variant carries exactly the ids it needs, so resolution code matches on
//! variants instead of comparing strings.
//!
//! | type                 | reference_id  | second_reference_id |
//! |----------------------|---------------|---------------------|
//! | `follow_request`     | follower      | -                   |
//! | `group_invitation`   | group         | -                   |
//! | `join_group_request` | group         | requester           |
//! | `new_event`          | group         | -                   |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::value_objects::{GroupId, NotificationId, UserId};

/// What a notification is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    FollowRequest { follower: UserId },
    GroupInvitation { group: GroupId },
    JoinGroupRequest { group: GroupId, requester: UserId },
    Event { group: GroupId },
}

impl NotificationKind {
    pub const FOLLOW_REQUEST: &'static str = "follow_request";
    pub const GROUP_INVITATION: &'static str = "group_invitation";
    pub const JOIN_GROUP_REQUEST: &'static str = "join_group_request";
    pub const NEW_EVENT: &'static str = "new_event";

    /// Stored and wire type name
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::FollowRequest { .. } => Self::FOLLOW_REQUEST,
            Self::GroupInvitation { .. } => Self::GROUP_INVITATION,
            Self::JoinGroupRequest { .. } => Self::JOIN_GROUP_REQUEST,
            Self::Event { .. } => Self::NEW_EVENT,
        }
    }

    pub fn reference_id(&self) -> i64 {
        match self {
            Self::FollowRequest { follower } => follower.into_inner(),
            Self::GroupInvitation { group }
            | Self::JoinGroupRequest { group, .. }
            | Self::Event { group } => group.into_inner(),
        }
    }

    pub fn second_reference_id(&self) -> Option<i64> {
        match self {
            Self::JoinGroupRequest { requester, .. } => Some(requester.into_inner()),
            _ => None,
        }
    }

    /// Decode the stored columns.
    ///
    /// Returns `None` for an unrecognized type name, or for a
    /// `join_group_request` row missing its requester; such rows carry no
    /// resolvable cascade.
    pub fn decode(type_name: &str, reference_id: i64, second_reference_id: Option<i64>) -> Option<Self> {
        match type_name {
            Self::FOLLOW_REQUEST => Some(Self::FollowRequest {
                follower: UserId::new(reference_id),
            }),
            Self::GROUP_INVITATION => Some(Self::GroupInvitation {
                group: GroupId::new(reference_id),
            }),
            Self::JOIN_GROUP_REQUEST => second_reference_id.map(|requester| Self::JoinGroupRequest {
                group: GroupId::new(reference_id),
                requester: UserId::new(requester),
            }),
            Self::NEW_EVENT => Some(Self::Event {
                group: GroupId::new(reference_id),
            }),
            _ => None,
        }
    }

    /// Whether answering this notification changes relationship state
    #[inline]
    pub fn has_cascade(&self) -> bool {
        !matches!(self, Self::Event { .. })
    }
}

/// Notification status; leaves `Unread` exactly once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationStatus {
    Unread,
    Accepted,
    Rejected,
}

impl NotificationStatus {
    #[inline]
    pub const fn from_decision(accepted: bool) -> Self {
        if accepted {
            Self::Accepted
        } else {
            Self::Rejected
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unread => "unread",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for NotificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unread" => Ok(Self::Unread),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            other => Err(DomainError::InternalError(format!(
                "unknown notification status '{other}'"
            ))),
        }
    }
}

/// Notification entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    /// Owning (recipient) user
    pub user_id: UserId,
    pub kind: NotificationKind,
    pub message: String,
    pub status: NotificationStatus,
    pub created_at: DateTime<Utc>,
}

/// A notification about to be stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotification {
    pub user_id: UserId,
    pub kind: NotificationKind,
    pub message: String,
}

impl NewNotification {
    /// "{follower} has sent you a follow request."
    pub fn follow_request(recipient: UserId, follower: UserId, follower_name: &str) -> Self {
        Self {
            user_id: recipient,
            kind: NotificationKind::FollowRequest { follower },
            message: format!("{follower_name} has sent you a follow request."),
        }
    }

    /// "{inviter} has invited you to join the group '{title}'."
    pub fn group_invitation(recipient: UserId, group: GroupId, inviter_name: &str, title: &str) -> Self {
        Self {
            user_id: recipient,
            kind: NotificationKind::GroupInvitation { group },
            message: format!("{inviter_name} has invited you to join the group '{title}'."),
        }
    }

    /// "{requester} has requested to join your group '{title}'."
    pub fn join_group_request(
        owner: UserId,
        group: GroupId,
        requester: UserId,
        requester_name: &str,
        title: &str,
    ) -> Self {
        Self {
            user_id: owner,
            kind: NotificationKind::JoinGroupRequest { group, requester },
            message: format!("{requester_name} has requested to join your group '{title}'."),
        }
    }

    /// "There is a new event in the group '{title}'."
    pub fn new_event(recipient: UserId, group: GroupId, title: &str) -> Self {
        Self {
            user_id: recipient,
            kind: NotificationKind::Event { group },
            message: format!("There is a new event in the group '{title}'."),
        }
    }
}
