//! Chat socket
//!
//! Every inbound frame names a chat. The first frame for a chat registers
//! the connection as a listener, provided the user participates in it.
//! Deliverable messages go through the delivery pipeline and, once stored,
//! the received frame is broadcast verbatim to every listener of the chat,
//! the sender included. Participation is re-read on each broadcast, so a
//! listener who has left the group or unfollowed stops receiving frames.

use std::collections::HashSet;

use axum::extract::ws::{Message, WebSocket};
use futures_util::StreamExt;
use social_core::value_objects::{ChatId, UserId};
use social_service::{ChatDeliveryService, ChatMessagePayload, ChatService, Delivery};

use super::error::HandlerResult;
use crate::connection::{spawn_writer, Outbound};
use crate::server::GatewayState;

/// Run one chat connection until the client goes away
pub async fn serve_chat(state: GatewayState, user_id: UserId, socket: WebSocket) {
    let (sink, mut stream) = socket.split();
    let (outbound, receiver) = Outbound::channel(state.config().realtime.outbound_buffer);
    let writer = spawn_writer(sink, receiver, outbound.id());
    let mut joined = HashSet::new();

    tracing::info!(user_id = %user_id, connection_id = %outbound.id(), "Chat connection established");

    while let Some(frame) = stream.next().await {
        match frame {
            Ok(Message::Text(text)) => {
                if let Err(e) = handle_chat_frame(&state, user_id, &outbound, &mut joined, &text).await {
                    e.log("chat");
                }
            }
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(connection_id = %outbound.id(), error = %e, "WebSocket error");
                break;
            }
        }
    }

    state.registry().unregister_connection(outbound.id(), joined);
    tracing::info!(user_id = %user_id, connection_id = %outbound.id(), "Chat connection closed");

    drop(outbound);
    let _ = writer.await;
}

async fn handle_chat_frame(
    state: &GatewayState,
    user_id: UserId,
    outbound: &Outbound,
    joined: &mut HashSet<ChatId>,
    text: &str,
) -> HandlerResult<()> {
    let payload: ChatMessagePayload = serde_json::from_str(text)?;
    let chat_id = payload.chat_id;
    let ctx = state.service_context();

    if !joined.contains(&chat_id) && ChatService::new(ctx).is_participant(user_id, chat_id).await? {
        state.registry().register(chat_id, user_id, outbound);
        joined.insert(chat_id);
    }

    match ChatDeliveryService::new(ctx).deliver(user_id, payload.into()).await? {
        Delivery::Delivered(message) => {
            // Delivery proved the sender participates; re-register in case a
            // past broadcast evicted this connection
            state.registry().register(chat_id, user_id, outbound);
            joined.insert(chat_id);

            let participants = ChatService::new(ctx).participant_ids(chat_id).await?;
            let listeners = state.registry().broadcast(chat_id, text, &participants);
            tracing::debug!(message_id = %message.id, chat_id = %chat_id, listeners, "Chat message broadcast");
        }
        Delivery::Ignored(reason) => {
            tracing::trace!(chat_id = %chat_id, ?reason, "Chat frame not delivered");
        }
    }

    Ok(())
}
