//! Data transfer objects for API requests, API responses and realtime frames
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Realtime frames for the chat and notification channels
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod realtime;
pub mod requests;
pub mod responses;

pub use realtime::{ChatMessagePayload, NotificationClientMessage, NotificationPayload};
pub use requests::{CreateGroupRequest, FollowUserRequest, InviteMembersRequest, NotificationResponseRequest};
pub use responses::{
    EventAnnouncedResponse, FollowStatusResponse, GroupResponse, HealthChecks, HealthResponse,
    InviteResponse, MembershipResponse, MessageResponse, NotificationResolvedResponse, ReadinessResponse, UnfollowResponse,
    UserResponse,
};
