//! Authentication extractor
//!
//! Resolves the session token (cookie or bearer) to the acting user.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use social_core::value_objects::UserId;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated user extracted from the session
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    /// User behind the session token
    pub user_id: UserId,
}

impl AuthUser {
    /// Create a new AuthUser
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let user_id = social_gateway::authenticate(app_state.service_context(), &parts.headers)
            .await
            .map_err(|e| {
                tracing::debug!(error = %e, "Request not authenticated");
                ApiError::from(e)
            })?;

        Ok(AuthUser::new(user_id))
    }
}
