//! Chat handlers
//!
//! Read side of chats. Sending happens over the chat WebSocket.

use axum::{extract::State, Json};
use social_core::value_objects::ChatId;
use social_core::ChatSummary;
use social_service::{ChatService, MessageResponse};

use crate::extractors::{AuthUser, IdPath};
use crate::response::ApiResult;
use crate::state::AppState;

/// Chats of the caller with display names
///
/// GET /chats
pub async fn get_chats(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<Vec<ChatSummary>>> {
    let service = ChatService::new(state.service_context());
    Ok(Json(service.chats(auth.user_id).await?))
}

/// Message history of a chat; marks the chat read for the caller
///
/// GET /chats/{chat_id}/messages
pub async fn get_messages(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(chat_id): IdPath<ChatId>,
) -> ApiResult<Json<Vec<MessageResponse>>> {
    let service = ChatService::new(state.service_context());
    let messages = service.messages(auth.user_id, chat_id).await?;
    Ok(Json(messages.into_iter().map(MessageResponse::from).collect()))
}

/// Ids of chats with unread messages
///
/// GET /chats/unread
pub async fn get_unread_chats(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<Vec<ChatId>>> {
    let service = ChatService::new(state.service_context());
    Ok(Json(service.unread_chat_ids(auth.user_id).await?))
}
