//! Follow entity - a directed follower -> following relation

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::value_objects::UserId;

/// Follow relation status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FollowStatus {
    Pending,
    Accepted,
    Rejected,
}

impl FollowStatus {
    /// Status a decision on a follow request resolves to
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
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }

    #[inline]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

impl fmt::Display for FollowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FollowStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            other => Err(DomainError::InternalError(format!(
                "unknown follow status '{other}'"
            ))),
        }
    }
}

/// Follow row; at most one exists per ordered (follower, following) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Follow {
    pub follower_id: UserId,
    pub following_id: UserId,
    pub status: FollowStatus,
}

impl Follow {
    pub fn new(follower_id: UserId, following_id: UserId, status: FollowStatus) -> Self {
        Self {
            follower_id,
            following_id,
            status,
        }
    }

    /// The same pair seen from the other side
    pub fn reverse_key(&self) -> (UserId, UserId) {
        (self.following_id, self.follower_id)
    }
}
