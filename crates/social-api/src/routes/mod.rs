//! Route definitions
//!
//! REST routes are mounted under /api/v1; the WebSocket routes come from
//! the gateway and keep their own paths.

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::handlers::{chats, follows, groups, health, notifications};
use crate::state::AppState;

/// Create the main router: REST API plus the realtime gateway
pub fn create_router() -> Router<AppState> {
    Router::new()
        .nest("/api/v1", api_v1_routes())
        .merge(social_gateway::create_router())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(follow_routes())
        .merge(group_routes())
        .merge(notification_routes())
        .merge(chat_routes())
}

/// Follow routes
fn follow_routes() -> Router<AppState> {
    Router::new()
        .route("/follows", post(follows::follow_user))
        .route("/follows/:user_id", get(follows::get_follow_status))
        .route("/follows/:user_id", delete(follows::unfollow_user))
        .route("/users/:user_id/followers", get(follows::get_followers))
        .route("/users/:user_id/following", get(follows::get_following))
}

/// Group routes
fn group_routes() -> Router<AppState> {
    Router::new()
        .route("/groups", post(groups::create_group))
        .route("/groups/:group_id/invitations", post(groups::invite_members))
        .route("/groups/:group_id/join", post(groups::join_group))
        .route("/groups/:group_id/leave", post(groups::leave_group))
        .route("/groups/:group_id/events", post(groups::announce_event))
        .route("/groups/:group_id/membership", get(groups::get_membership))
}

/// Notification routes
fn notification_routes() -> Router<AppState> {
    Router::new().route(
        "/notifications/:notification_id/response",
        post(notifications::respond_to_notification),
    )
}

/// Chat routes
fn chat_routes() -> Router<AppState> {
    Router::new()
        .route("/chats", get(chats::get_chats))
        .route("/chats/unread", get(chats::get_unread_chats))
        .route("/chats/:chat_id/messages", get(chats::get_messages))
}
