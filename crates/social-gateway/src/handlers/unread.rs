//! Unread-chat socket
//!
//! Pushes the ids of the user's chats with unread messages on every tick,
//! as a JSON array. Inbound frames are ignored.

use axum::extract::ws::{Message, WebSocket};
use futures_util::StreamExt;
use social_core::value_objects::UserId;
use social_service::ChatService;

use crate::connection::{spawn_writer, Outbound};
use crate::server::GatewayState;

/// Run one unread-chat connection until the client goes away
pub async fn serve_unread(state: GatewayState, user_id: UserId, socket: WebSocket) {
    let (sink, mut stream) = socket.split();
    let (outbound, receiver) = Outbound::channel(state.config().realtime.outbound_buffer);
    let writer = spawn_writer(sink, receiver, outbound.id());
    let pusher = tokio::spawn(push_unread(state.clone(), user_id, outbound));

    while let Some(Ok(frame)) = stream.next().await {
        if let Message::Close(_) = frame {
            break;
        }
    }

    pusher.abort();
    let _ = pusher.await;
    let _ = writer.await;
    tracing::debug!(user_id = %user_id, "Unread-chat connection closed");
}

async fn push_unread(state: GatewayState, user_id: UserId, outbound: Outbound) {
    let mut ticker = tokio::time::interval(state.config().realtime.poll_interval());

    loop {
        ticker.tick().await;

        let chat_ids = match ChatService::new(state.service_context()).unread_chat_ids(user_id).await {
            Ok(chat_ids) => chat_ids,
            Err(e) => {
                tracing::warn!(user_id = %user_id, error = %e, "Failed to fetch unread chats");
                continue;
            }
        };

        let Ok(json) = serde_json::to_string(&chat_ids) else {
            continue;
        };
        if outbound.send(json).await.is_err() {
            break;
        }
    }
}
