//! User entity <-> model mapper

use social_core::entities::User;
use social_core::value_objects::UserId;

use crate::models::UserModel;

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: UserId::new(model.user_id),
            first_name: model.firstname,
            last_name: model.lastname,
            profile_public: model.profile_public,
        }
    }
}
