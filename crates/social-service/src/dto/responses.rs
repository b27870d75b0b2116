//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Ids are serialized as JSON numbers.

use chrono::{DateTime, Utc};
use serde::Serialize;
use social_core::value_objects::{ChatId, GroupId, MessageId, NotificationId, UserId};

// ============================================================================
// User / Follow Responses
// ============================================================================

/// A user as listed in followers / following
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub user_id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
}

/// Status of one ordered follow pair
#[derive(Debug, Clone, Serialize)]
pub struct FollowStatusResponse {
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UnfollowResponse {
    pub status: String,
    pub chat_removed: bool,
}

// ============================================================================
// Group Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct GroupResponse {
    pub group_id: GroupId,
    pub owner_id: UserId,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Membership status; `not_member` when the user never interacted
#[derive(Debug, Clone, Serialize)]
pub struct MembershipResponse {
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct InviteResponse {
    pub invited: Vec<UserId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventAnnouncedResponse {
    pub notified: usize,
}

// ============================================================================
// Notification Responses
// ============================================================================

/// Outcome of answering a notification
#[derive(Debug, Clone, Serialize)]
pub struct NotificationResolvedResponse {
    pub notification_id: NotificationId,
    pub status: String,
    /// Chat the cascade created or joined, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<ChatId>,
}

// ============================================================================
// Chat Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message_id: MessageId,
    pub chat_id: ChatId,
    pub sender_id: UserId,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }
}
