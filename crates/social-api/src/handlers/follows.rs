//! Follow handlers
//!
//! Endpoints for following, unfollowing and listing follow relations.

use axum::{extract::State, Json};
use social_core::value_objects::UserId;
use social_service::{
    FollowService, FollowStatusResponse, FollowUserRequest, UnfollowResponse, UserResponse,
};

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Follow a user. Public profiles are followed at once, private ones get a request.
///
/// POST /follows
pub async fn follow_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<FollowUserRequest>,
) -> ApiResult<Json<FollowStatusResponse>> {
    let service = FollowService::new(state.service_context());
    let status = service.follow(auth.user_id, request.user_id).await?;
    Ok(Json(FollowStatusResponse {
        status: status.to_string(),
    }))
}

/// Stop following a user
///
/// DELETE /follows/{user_id}
pub async fn unfollow_user(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(user_id): IdPath<UserId>,
) -> ApiResult<Json<UnfollowResponse>> {
    let service = FollowService::new(state.service_context());
    let outcome = service.unfollow(auth.user_id, user_id).await?;
    Ok(Json(UnfollowResponse {
        status: social_core::FollowStatus::Rejected.to_string(),
        chat_removed: outcome.removed_chat.is_some(),
    }))
}

/// Status of the caller's follow towards a user
///
/// GET /follows/{user_id}
pub async fn get_follow_status(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(user_id): IdPath<UserId>,
) -> ApiResult<Json<FollowStatusResponse>> {
    let service = FollowService::new(state.service_context());
    let status = service.status(auth.user_id, user_id).await?;
    Ok(Json(FollowStatusResponse {
        status: status.to_string(),
    }))
}

/// Accepted followers of a user
///
/// GET /users/{user_id}/followers
pub async fn get_followers(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(user_id): IdPath<UserId>,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let service = FollowService::new(state.service_context());
    let users = service.followers(user_id).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Users a user follows
///
/// GET /users/{user_id}/following
pub async fn get_following(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(user_id): IdPath<UserId>,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let service = FollowService::new(state.service_context());
    let users = service.following(user_id).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}
