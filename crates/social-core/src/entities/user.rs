//! User entity - the slice of a user account the relationship core needs

use crate::value_objects::UserId;

/// User entity
///
/// Profile editing and registration live outside this system; only the
/// display name and the visibility flag are consumed here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub profile_public: bool,
}

impl User {
    /// Create a new User
    pub fn new(id: UserId, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            profile_public: true,
        }
    }

    /// "First Last", used in notification messages and chat names
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Private profiles require an explicit follow approval
    #[inline]
    pub fn requires_follow_approval(&self) -> bool {
        !self.profile_public
    }
}
