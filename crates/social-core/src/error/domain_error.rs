//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{ChatId, GroupId, NotificationId, UserId};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("Group not found: {0}")]
    GroupNotFound(GroupId),

    #[error("Chat not found: {0}")]
    ChatNotFound(ChatId),

    #[error("No chat exists for group {0}")]
    GroupChatNotFound(GroupId),

    /// Also returned when the notification belongs to someone else
    #[error("Notification not found: {0}")]
    NotificationNotFound(NotificationId),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Cannot follow yourself")]
    CannotFollowSelf,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Not a participant of this chat")]
    NotChatParticipant,

    #[error("Not a member of this group")]
    NotGroupMember,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Already a member of this group")]
    AlreadyMember,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::GroupNotFound(_) => "UNKNOWN_GROUP",
            Self::ChatNotFound(_) => "UNKNOWN_CHAT",
            Self::GroupChatNotFound(_) => "UNKNOWN_GROUP_CHAT",
            Self::NotificationNotFound(_) => "UNKNOWN_NOTIFICATION",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::CannotFollowSelf => "CANNOT_FOLLOW_SELF",

            // Authorization
            Self::NotChatParticipant => "NOT_CHAT_PARTICIPANT",
            Self::NotGroupMember => "NOT_GROUP_MEMBER",

            // Conflict
            Self::AlreadyMember => "ALREADY_MEMBER",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::GroupNotFound(_)
                | Self::ChatNotFound(_)
                | Self::GroupChatNotFound(_)
                | Self::NotificationNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_) | Self::CannotFollowSelf)
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotChatParticipant | Self::NotGroupMember)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::AlreadyMember)
    }
}
