//! Defines the profile store trait.

use crate::{
    Error,
    models::{PasswordHash, Profile, UserId},
};

/// Creates and retrieves user profiles.
pub trait ProfileStore {
    /// Create a new profile.
    ///
    /// # Errors
    ///
    /// Returns [Error::DuplicateEmail] if a profile with the same email
    /// already exists.
    fn create(
        &self,
        email: &str,
        full_name: &str,
        password_hash: PasswordHash,
    ) -> Result<Profile, Error>;

    /// Get a profile by its user ID.
    fn get(&self, id: UserId) -> Result<Profile, Error>;

    /// Get a profile by its email address.
    fn get_by_email(&self, email: &str) -> Result<Profile, Error>;

    /// Update the display name of a profile.
    fn update_full_name(&self, id: UserId, full_name: &str) -> Result<Profile, Error>;

    /// Replace the password hash of a profile.
    fn update_password(&self, id: UserId, password_hash: PasswordHash) -> Result<(), Error>;
}
