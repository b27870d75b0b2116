//! # social-gateway
//!
//! WebSocket gateway for real-time chat delivery, notification push and
//! unread-chat updates.

pub mod connection;
pub mod handlers;
pub mod server;

pub use connection::{ChatRegistry, ConnectionId, Outbound};
pub use server::{authenticate, create_router, session_token, GatewayState, SessionUser};
