//! Notification socket
//!
//! A poller pushes batches of unread notifications newer than the
//! connection's checkpoint. It wakes on every interval tick and whenever the
//! notification hub reports a new notification for the user. Inbound frames
//! carry responses, which go through the relationship engine.

use axum::extract::ws::{Message, WebSocket};
use futures_util::StreamExt;
use social_core::value_objects::UserId;
use social_service::{
    NotificationCheckpoint, NotificationClientMessage, NotificationPayload, NotificationService,
    RelationshipService,
};
use tokio::time::MissedTickBehavior;

use super::error::HandlerResult;
use crate::connection::{spawn_writer, Outbound};
use crate::server::GatewayState;

/// Run one notification connection until the client goes away
pub async fn serve_notifications(state: GatewayState, user_id: UserId, socket: WebSocket) {
    let (sink, mut stream) = socket.split();
    let (outbound, receiver) = Outbound::channel(state.config().realtime.outbound_buffer);
    let writer = spawn_writer(sink, receiver, outbound.id());
    let poller = tokio::spawn(poll_notifications(state.clone(), user_id, outbound.clone()));

    tracing::info!(user_id = %user_id, connection_id = %outbound.id(), "Notification connection established");

    while let Some(frame) = stream.next().await {
        match frame {
            Ok(Message::Text(text)) => {
                if let Err(e) = handle_notification_frame(&state, user_id, &text).await {
                    e.log("notifications");
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

    poller.abort();
    let _ = poller.await;
    state.service_context().notification_hub().release(user_id);
    tracing::info!(user_id = %user_id, connection_id = %outbound.id(), "Notification connection closed");

    drop(outbound);
    let _ = writer.await;
}

async fn poll_notifications(state: GatewayState, user_id: UserId, outbound: Outbound) {
    let ctx = state.service_context();
    let mut wakeups = ctx.notification_hub().subscribe(user_id);
    let mut ticker = tokio::time::interval(state.config().realtime.poll_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut checkpoint = NotificationCheckpoint::new();

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            Ok(()) = wakeups.changed() => {}
        }

        let batch = match NotificationService::new(ctx).poll(user_id, &mut checkpoint).await {
            Ok(batch) if batch.is_empty() => continue,
            Ok(batch) => batch,
            Err(e) => {
                tracing::warn!(user_id = %user_id, error = %e, "Failed to fetch notifications");
                continue;
            }
        };

        let payload: Vec<NotificationPayload> = batch.iter().map(NotificationPayload::from).collect();
        let json = match serde_json::to_string(&payload) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(error = %e, "Failed to encode notifications");
                continue;
            }
        };

        if outbound.send(json).await.is_err() {
            break;
        }
        tracing::debug!(user_id = %user_id, count = payload.len(), "Notifications pushed");
    }
}

async fn handle_notification_frame(state: &GatewayState, user_id: UserId, text: &str) -> HandlerResult<()> {
    let NotificationClientMessage::NotificationResponse {
        notification_id,
        accepted,
    } = serde_json::from_str(text)?;

    RelationshipService::new(state.service_context())
        .respond(user_id, notification_id, accepted)
        .await?;

    Ok(())
}
