//! Group entity <-> model mapper

use social_core::entities::Group;
use social_core::value_objects::{GroupId, UserId};

use crate::models::GroupModel;

impl From<GroupModel> for Group {
    fn from(model: GroupModel) -> Self {
        Group {
            id: GroupId::new(model.group_id),
            owner_id: UserId::new(model.owner_id),
            title: model.title,
            description: model.description,
            created_at: model.created_at,
        }
    }
}
