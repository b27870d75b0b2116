//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use serde::Deserialize;
use social_core::value_objects::UserId;
use validator::Validate;

use crate::services::CreateGroup;

// ============================================================================
// Follow Requests
// ============================================================================

/// Follow a user
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct FollowUserRequest {
    pub user_id: UserId,
}

// ============================================================================
// Group Requests
// ============================================================================

/// Create group request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateGroupRequest {
    #[validate(length(min = 1, max = 100, message = "Group title must be 1-100 characters"))]
    pub title: String,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    #[serde(default)]
    pub description: String,

    /// Users to invite right away
    #[validate(length(max = 100, message = "At most 100 users can be invited at once"))]
    #[serde(default)]
    pub invited_members: Vec<UserId>,
}

impl From<CreateGroupRequest> for CreateGroup {
    fn from(request: CreateGroupRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            invited_members: request.invited_members,
        }
    }
}

/// Invite users to a group
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct InviteMembersRequest {
    #[validate(length(min = 1, max = 100, message = "Invite 1-100 users at a time"))]
    pub members: Vec<UserId>,
}

/// Answer a notification over REST; same semantics as the notification socket
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NotificationResponseRequest {
    pub accepted: bool,
}
