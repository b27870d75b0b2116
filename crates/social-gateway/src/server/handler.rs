//! WebSocket upgrade handlers
//!
//! Each upgrade requires a valid session before the protocol switch.

use axum::{
    extract::{State, WebSocketUpgrade},
    response::IntoResponse,
};

use super::auth::SessionUser;
use super::GatewayState;
use crate::handlers::{serve_chat, serve_notifications, serve_unread};

/// Chat channel: send messages and listen on the user's chats
pub async fn chat_socket(
    State(state): State<GatewayState>,
    SessionUser(user_id): SessionUser,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_failed_upgrade(|e| tracing::warn!(error = %e, "Chat upgrade failed"))
        .on_upgrade(move |socket| serve_chat(state, user_id, socket))
}

/// Notification channel: pushed notifications and responses to them
pub async fn notification_socket(
    State(state): State<GatewayState>,
    SessionUser(user_id): SessionUser,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_failed_upgrade(|e| tracing::warn!(error = %e, "Notification upgrade failed"))
        .on_upgrade(move |socket| serve_notifications(state, user_id, socket))
}

/// Unread-chat channel: ids of chats with unread messages
pub async fn unread_socket(
    State(state): State<GatewayState>,
    SessionUser(user_id): SessionUser,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_failed_upgrade(|e| tracing::warn!(error = %e, "Unread-chat upgrade failed"))
        .on_upgrade(move |socket| serve_unread(state, user_id, socket))
}
