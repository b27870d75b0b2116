//! Follow entity <-> model mapper

use social_core::entities::Follow;
use social_core::error::DomainError;
use social_core::value_objects::UserId;

use crate::models::FollowModel;

impl TryFrom<FollowModel> for Follow {
    type Error = DomainError;

    fn try_from(model: FollowModel) -> Result<Self, Self::Error> {
        Ok(Follow {
            follower_id: UserId::new(model.follower_id),
            following_id: UserId::new(model.following_id),
            status: model.status.parse()?,
        })
    }
}
