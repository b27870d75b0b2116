//! Notification entity <-> model mapper

use social_core::entities::{Notification, NotificationKind};
use social_core::error::DomainError;
use social_core::traits::NotificationReference;
use social_core::value_objects::{NotificationId, UserId};

use crate::models::{NotificationModel, NotificationReferenceModel};

impl TryFrom<NotificationModel> for Notification {
    type Error = DomainError;

    fn try_from(model: NotificationModel) -> Result<Self, Self::Error> {
        let kind = NotificationKind::decode(
            &model.notification_type,
            model.reference_id,
            model.second_reference_id,
        )
        .ok_or_else(|| {
            DomainError::InternalError(format!(
                "notification {} has undecodable type '{}'",
                model.notification_id, model.notification_type
            ))
        })?;

        Ok(Notification {
            id: NotificationId::new(model.notification_id),
            user_id: UserId::new(model.user_id),
            kind,
            message: model.message,
            status: model.status.parse()?,
            created_at: model.created_at,
        })
    }
}

impl From<NotificationReferenceModel> for NotificationReference {
    fn from(model: NotificationReferenceModel) -> Self {
        NotificationReference {
            type_name: model.notification_type,
            reference_id: model.reference_id,
            second_reference_id: model.second_reference_id,
        }
    }
}
