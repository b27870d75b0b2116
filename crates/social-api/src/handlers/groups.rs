//! Group handlers
//!
//! Endpoints for creating groups and managing membership.

use axum::{extract::State, Json};
use social_core::value_objects::GroupId;
use social_core::MemberStatus;
use social_service::{
    CreateGroupRequest, EventAnnouncedResponse, GroupResponse, GroupService, InviteMembersRequest,
    InviteResponse, MembershipResponse,
};

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Create a group with its chat, inviting the listed users
///
/// POST /groups
pub async fn create_group(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateGroupRequest>,
) -> ApiResult<Created<Json<GroupResponse>>> {
    let service = GroupService::new(state.service_context());
    let group = service.create(auth.user_id, request.into()).await?;
    Ok(Created(Json(GroupResponse::from(group))))
}

/// Invite users to a group
///
/// POST /groups/{group_id}/invitations
pub async fn invite_members(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(group_id): IdPath<GroupId>,
    ValidatedJson(request): ValidatedJson<InviteMembersRequest>,
) -> ApiResult<Json<InviteResponse>> {
    let service = GroupService::new(state.service_context());
    let invited = service.invite(auth.user_id, group_id, &request.members).await?;
    Ok(Json(InviteResponse { invited }))
}

/// Ask to join a group
///
/// POST /groups/{group_id}/join
pub async fn join_group(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(group_id): IdPath<GroupId>,
) -> ApiResult<Json<MembershipResponse>> {
    let service = GroupService::new(state.service_context());
    service.join(auth.user_id, group_id).await?;
    Ok(Json(MembershipResponse {
        status: MemberStatus::Request.to_string(),
    }))
}

/// Leave a group and its chat
///
/// POST /groups/{group_id}/leave
pub async fn leave_group(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(group_id): IdPath<GroupId>,
) -> ApiResult<NoContent> {
    let service = GroupService::new(state.service_context());
    service.leave(auth.user_id, group_id).await?;
    Ok(NoContent)
}

/// Notify every accepted member about a new event
///
/// POST /groups/{group_id}/events
pub async fn announce_event(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(group_id): IdPath<GroupId>,
) -> ApiResult<Created<Json<EventAnnouncedResponse>>> {
    let service = GroupService::new(state.service_context());
    let notified = service.announce_event(auth.user_id, group_id).await?;
    Ok(Created(Json(EventAnnouncedResponse { notified })))
}

/// The caller's membership status
///
/// GET /groups/{group_id}/membership
pub async fn get_membership(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(group_id): IdPath<GroupId>,
) -> ApiResult<Json<MembershipResponse>> {
    let service = GroupService::new(state.service_context());
    let status = service.membership(auth.user_id, group_id).await?;
    Ok(Json(MembershipResponse {
        status: status.map_or_else(|| "not_member".to_string(), |s| s.to_string()),
    }))
}
