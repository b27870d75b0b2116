//! # social-api
//!
//! REST API server built with Axum. It also hosts the realtime gateway's
//! WebSocket routes so both share one service context.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, run};
pub use state::AppState;
