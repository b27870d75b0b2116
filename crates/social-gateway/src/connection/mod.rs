//! Connection management
//!
//! Outbound queues for individual sockets and the chat registry that fans
//! messages out to them.

mod outbound;
mod registry;

pub use outbound::{spawn_writer, ConnectionId, Outbound, OutboundError};
pub use registry::ChatRegistry;
