//! Per-connection outbound queue
//!
//! Every socket has exactly one writer task. Anything that wants to write to
//! the socket (the read loop, a poller, a broadcast from another connection)
//! goes through the bounded queue in front of that task.

use std::fmt;

use axum::extract::ws::{Message, WebSocket};
use futures_util::stream::SplitSink;
use futures_util::SinkExt;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Identity of one open socket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OutboundError {
    #[error("Outbound queue is full")]
    Full,

    #[error("Connection closed")]
    Closed,
}

/// Handle for queueing text frames to one connection
#[derive(Debug, Clone)]
pub struct Outbound {
    id: ConnectionId,
    sender: mpsc::Sender<String>,
}

impl Outbound {
    /// Create a handle and the receiving end for its writer task
    pub fn channel(buffer: usize) -> (Self, mpsc::Receiver<String>) {
        let (sender, receiver) = mpsc::channel(buffer.max(1));
        (
            Self {
                id: ConnectionId::generate(),
                sender,
            },
            receiver,
        )
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Queue a frame without waiting
    pub fn try_send(&self, text: impl Into<String>) -> Result<(), OutboundError> {
        self.sender.try_send(text.into()).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => OutboundError::Full,
            mpsc::error::TrySendError::Closed(_) => OutboundError::Closed,
        })
    }

    /// Queue a frame, waiting for space
    pub async fn send(&self, text: impl Into<String>) -> Result<(), OutboundError> {
        self.sender
            .send(text.into())
            .await
            .map_err(|_| OutboundError::Closed)
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

/// Drain the queue into the socket until every handle is dropped or a write fails
pub fn spawn_writer(
    mut sink: SplitSink<WebSocket, Message>,
    mut receiver: mpsc::Receiver<String>,
    id: ConnectionId,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(text) = receiver.recv().await {
            if let Err(e) = sink.send(Message::Text(text)).await {
                tracing::warn!(connection_id = %id, error = %e, "Failed to write to WebSocket");
                break;
            }
        }

        // Close the WebSocket when the queue is closed
        let _ = sink.close().await;
    })
}
