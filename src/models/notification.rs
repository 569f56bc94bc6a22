//! This file defines the notification model: a user-facing alert, append-only
//! apart from flipping its read flag.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::database_id::{NotificationId, TransactionId};
use crate::models::UserId;

/// A user-facing alert, e.g. a reminder about an upcoming scheduled payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// The ID of the notification.
    pub id: NotificationId,
    /// The ID of the user the notification belongs to.
    pub user_id: UserId,
    /// A short title.
    pub title: String,
    /// The message body.
    pub message: String,
    /// A free-form tag describing the kind of alert, e.g. "scheduled".
    pub kind: String,
    /// Whether the user has read the notification.
    pub is_read: bool,
    /// The transaction the notification refers to, if any.
    pub related_id: Option<TransactionId>,
    /// When the notification was created, assigned by the store.
    pub created_at: OffsetDateTime,
}

/// The fields needed to append a notification to a user's feed.
#[derive(Debug, Clone, PartialEq)]
pub struct NewNotification {
    /// The ID of the user the notification is for.
    pub user_id: UserId,
    /// A short title.
    pub title: String,
    /// The message body.
    pub message: String,
    /// A free-form tag describing the kind of alert.
    pub kind: String,
    /// The transaction the notification refers to, if any.
    pub related_id: Option<TransactionId>,
}
