//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod chat;
pub mod context;
pub mod delivery;
pub mod error;
pub mod follow;
pub mod group;
pub mod hub;
pub mod notification;
pub mod relationship;
pub mod unread;

// Re-export all services for convenience
pub use chat::ChatService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use delivery::{ChatDeliveryService, Delivery, IgnoreReason};
pub use error::{ServiceError, ServiceResult};
pub use follow::{FollowService, Unfollow};
pub use group::{CreateGroup, GroupService};
pub use hub::NotificationHub;
pub use notification::{NotificationCheckpoint, NotificationService};
pub use relationship::{RelationshipService, Resolution};
pub use unread::UnreadTracker;
