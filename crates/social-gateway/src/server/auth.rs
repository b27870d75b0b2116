//! Session authentication
//!
//! Clients present an opaque session token, either as the `session_token`
//! cookie or as a bearer token. The session repository resolves it to a user.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap, StatusCode},
};
use axum_extra::extract::CookieJar;
use social_common::AppError;
use social_core::value_objects::UserId;
use social_service::ServiceContext;

use super::GatewayState;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "session_token";

/// Session token from the cookie, falling back to `Authorization: Bearer`
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    if let Some(cookie) = jar.get(SESSION_COOKIE).filter(|c| !c.value().is_empty()) {
        return Some(cookie.value().to_string());
    }

    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(ToString::to_string)
}

/// Resolve the request's session to a user
pub async fn authenticate(ctx: &ServiceContext, headers: &HeaderMap) -> Result<UserId, AppError> {
    let token = session_token(headers).ok_or(AppError::MissingAuth)?;

    ctx.session_repo()
        .find_user_by_token(&token)
        .await?
        .ok_or(AppError::InvalidSession)
}

/// User behind the request's session; rejects the upgrade otherwise
#[derive(Debug, Clone, Copy)]
pub struct SessionUser(pub UserId);

#[async_trait]
impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
    GatewayState: FromRef<S>,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let gateway = GatewayState::from_ref(state);

        match authenticate(gateway.service_context(), &parts.headers).await {
            Ok(user_id) => Ok(SessionUser(user_id)),
            Err(e) => {
                if e.is_server_error() {
                    tracing::error!(error = %e, "Session lookup failed");
                } else {
                    tracing::debug!(error = %e, "WebSocket upgrade refused");
                }
                Err(StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR))
            }
        }
    }
}
