//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod chats;
pub mod follows;
pub mod groups;
pub mod health;
pub mod notifications;
