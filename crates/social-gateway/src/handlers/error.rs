//! Handler error types

use social_service::ServiceError;
use thiserror::Error;

/// Failure while handling one inbound frame.
///
/// Never fatal to the connection: the frame is logged and dropped.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Frame is not valid JSON for this channel
    #[error("Invalid payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    /// Service error
    #[error("Service error: {0}")]
    Service(#[from] ServiceError),
}

impl HandlerError {
    /// Whether the client caused the failure
    pub fn is_client_error(&self) -> bool {
        match self {
            Self::InvalidPayload(_) => true,
            Self::Service(e) => e.status_code() < 500,
        }
    }

    /// Log the dropped frame at a level matching who is at fault
    pub fn log(&self, channel: &'static str) {
        if self.is_client_error() {
            tracing::debug!(channel, error = %self, "Inbound frame dropped");
        } else {
            tracing::warn!(channel, error = %self, "Inbound frame failed");
        }
    }
}

/// Handler result type
pub type HandlerResult<T> = Result<T, HandlerError>;
