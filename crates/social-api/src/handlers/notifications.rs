//! Notification handlers

use axum::{extract::State, Json};
use social_core::value_objects::NotificationId;
use social_service::{NotificationResolvedResponse, NotificationResponseRequest, RelationshipService};

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Accept or reject a notification and apply its cascade
///
/// POST /notifications/{notification_id}/response
pub async fn respond_to_notification(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(notification_id): IdPath<NotificationId>,
    ValidatedJson(request): ValidatedJson<NotificationResponseRequest>,
) -> ApiResult<Json<NotificationResolvedResponse>> {
    let service = RelationshipService::new(state.service_context());
    let resolution = service
        .respond(auth.user_id, notification_id, request.accepted)
        .await?;
    Ok(Json(resolution.into()))
}
