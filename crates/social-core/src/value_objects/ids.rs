//! Typed identifiers
//!
//! Every entity key is its own newtype over the store-assigned `i64`, so a
//! `ChatId` can never be passed where a `GroupId` is expected. Ids serialize
//! as plain JSON numbers and accept either numbers or numeric strings on input.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Error when parsing an id from its string form
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IdParseError {
    #[error("invalid id format")]
    InvalidFormat,
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw store id
            #[inline]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the inner i64 value
            #[inline]
            pub const fn into_inner(self) -> i64 {
                self.0
            }

            /// Ids are assigned from 1; zero and negatives mean "not set"
            #[inline]
            pub const fn is_unset(&self) -> bool {
                self.0 <= 0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<i64>()
                    .map(Self)
                    .map_err(|_| IdParseError::InvalidFormat)
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.serialize_i64(self.0)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                deserializer.deserialize_any(RawIdVisitor).map(Self)
            }
        }
    };
}

struct RawIdVisitor;

impl<'de> serde::de::Visitor<'de> for RawIdVisitor {
    type Value = i64;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an integer or numeric string id")
    }

    fn visit_i64<E>(self, value: i64) -> Result<i64, E>
    where
        E: serde::de::Error,
    {
        Ok(value)
    }

    fn visit_u64<E>(self, value: u64) -> Result<i64, E>
    where
        E: serde::de::Error,
    {
        i64::try_from(value).map_err(|_| E::custom("id out of range"))
    }

    fn visit_str<E>(self, value: &str) -> Result<i64, E>
    where
        E: serde::de::Error,
    {
        value.trim().parse().map_err(|_| E::custom("invalid id format"))
    }
}

define_id!(
    /// User account id
    UserId
);
define_id!(
    /// Group id
    GroupId
);
define_id!(
    /// Chat (conversation) id
    ChatId
);
define_id!(
    /// Chat message id
    MessageId
);
define_id!(
    /// Notification id
    NotificationId
);
