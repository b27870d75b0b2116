//! Entity to model mappers
//!
//! Conversions from database rows (models) to domain entities. Rows whose
//! text columns do not parse into a domain enum map through `TryFrom`.

mod chat;
mod follow;
mod group;
mod message;
mod notification;
mod user;

pub use chat::direct_pair;
