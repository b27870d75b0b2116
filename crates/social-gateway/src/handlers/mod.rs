//! WebSocket connection handlers
//!
//! One module per channel. Each handler owns its socket for the lifetime of
//! the connection.

mod chat;
mod error;
mod notifications;
mod unread;

pub use chat::serve_chat;
pub use error::{HandlerError, HandlerResult};
pub use notifications::serve_notifications;
pub use unread::serve_unread;
