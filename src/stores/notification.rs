//! Defines the notification store trait.

use crate::{
    Error,
    database_id::NotificationId,
    models::{NewNotification, Notification, UserId},
};

/// Appends to and reads a user's notification feed.
///
/// The feed is append-only apart from flipping the read flag and deletion.
pub trait NotificationStore {
    /// Append a notification to the user's feed.
    fn create(&self, new_notification: NewNotification) -> Result<Notification, Error>;

    /// Get all of a user's notifications, newest first.
    fn get_by_user(&self, user_id: UserId) -> Result<Vec<Notification>, Error>;

    /// Mark a single notification as read.
    fn mark_read(&self, id: NotificationId, user_id: UserId) -> Result<(), Error>;

    /// Mark all of a user's notifications as read.
    fn mark_all_read(&self, user_id: UserId) -> Result<(), Error>;

    /// Delete a notification from the feed.
    fn delete(&self, id: NotificationId, user_id: UserId) -> Result<(), Error>;
}
