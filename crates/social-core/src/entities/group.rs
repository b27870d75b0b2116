//! Group and group membership entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::value_objects::{GroupId, UserId};

/// Group entity; exactly one group-linked chat is created with it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub id: GroupId,
    pub owner_id: UserId,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl Group {
    #[inline]
    pub fn is_owner(&self, user_id: UserId) -> bool {
        self.owner_id == user_id
    }
}

/// Data needed to create a group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGroup {
    pub owner_id: UserId,
    pub title: String,
    pub description: String,
}

/// Membership status of a user in a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    /// The user asked to join; the owner decides
    Request,
    /// A member invited the user; the user decides
    Invited,
    Accepted,
    Rejected,
}

impl MemberStatus {
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
            Self::Request => "request",
            Self::Invited => "invited",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }

    #[inline]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

impl fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MemberStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "request" => Ok(Self::Request),
            "invited" => Ok(Self::Invited),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            other => Err(DomainError::InternalError(format!(
                "unknown member status '{other}'"
            ))),
        }
    }
}

/// GroupMember row, unique per (group, user)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupMember {
    pub group_id: GroupId,
    pub user_id: UserId,
    pub status: MemberStatus,
}
