//! Gateway routes
//!
//! The gateway is mounted into the API server's router. Any router state
//! that can produce a [`GatewayState`] can host it.

mod auth;
mod handler;
mod state;

pub use auth::{authenticate, session_token, SessionUser, SESSION_COOKIE};
pub use handler::{chat_socket, notification_socket, unread_socket};
pub use state::GatewayState;

use axum::{extract::FromRef, routing::get, Router};

/// WebSocket endpoint paths
pub const CHAT_PATH: &str = "/api/chat/ws";
pub const NOTIFICATIONS_PATH: &str = "/api/notifications/ws";
pub const CHAT_NOTIFICATIONS_PATH: &str = "/api/chat-notifications/ws";

/// Create the gateway router
pub fn create_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    GatewayState: FromRef<S>,
{
    Router::new()
        .route(CHAT_PATH, get(chat_socket))
        .route(NOTIFICATIONS_PATH, get(notification_socket))
        .route(CHAT_NOTIFICATIONS_PATH, get(unread_socket))
}
