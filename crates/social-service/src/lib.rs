//! # social-service
//!
//! Application layer containing the relationship engine, the follow and
//! group workflows, the chat delivery pipeline, and DTOs.

pub mod dto;
pub mod services;

#[cfg(test)]
mod testing;

pub use dto::*;
pub use services::*;
