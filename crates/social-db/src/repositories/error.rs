//! Error handling utilities for repositories

use social_core::error::DomainError;
use social_core::value_objects::{ChatId, GroupId, UserId};
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Map foreign-key violations to a domain error, everything else to DatabaseError
pub fn map_fk_violation<F>(e: SqlxError, on_fk: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_foreign_key_violation() {
            return on_fk();
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Create a "user not found" error
pub fn user_not_found(id: UserId) -> DomainError {
    DomainError::UserNotFound(id)
}

/// Create a "chat not found" error
pub fn chat_not_found(id: ChatId) -> DomainError {
    DomainError::ChatNotFound(id)
}

/// Create a "group not found" error
pub fn group_not_found(id: GroupId) -> DomainError {
    DomainError::GroupNotFound(id)
}
