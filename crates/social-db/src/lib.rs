//! # social-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for all repository traits
//! defined in `social-core`. It handles:
//!
//! - Connection pool management and schema migrations
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations, including the transactional
//!   relationship store
//!
//! ## Usage
//!
//! ```rust,ignore
//! use social_db::pool::{create_pool, run_migrations, DatabaseConfig};
//! use social_db::repositories::PgFollowRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = social_common::AppConfig::from_env()?;
//!     let config = DatabaseConfig::from_settings(&settings.database);
//!     let pool = create_pool(&config).await?;
//!     run_migrations(&pool).await?;
//!     let follows = PgFollowRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{
    PgChatRepository, PgFollowRepository, PgGroupRepository, PgMessageRepository,
    PgNotificationRepository, PgRelationshipStore, PgSessionRepository, PgUnreadRepository,
    PgUserRepository,
};
