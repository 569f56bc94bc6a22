//! This file defines a user profile and its ID type.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::models::PasswordHash;

/// A newtype wrapper for integer user IDs.
/// This helps disambiguate user IDs from other types of IDs, leading to
/// better compile time errors, and more flexible generics that can have
/// distinct implementations for multiple ID types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw database ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// The raw database ID.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A user of the application and their account details.
///
/// Every other entity in the store is scoped to exactly one profile through
/// its `user_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    /// The ID of the user.
    pub id: UserId,
    /// The email address used to log in. Unique across profiles.
    pub email: String,
    /// The user's display name.
    pub full_name: String,
    /// The user's salted and hashed password.
    pub password_hash: PasswordHash,
    /// When the profile was created, assigned by the store.
    pub created_at: OffsetDateTime,
}
