//! The handlers for the notification endpoints.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;
use time::OffsetDateTime;

use crate::{
    Error,
    database_id::{NotificationId, TransactionId},
    models::{Notification, UserId},
    notification::feed::{merge_pushed, unread_count, upcoming_payment_reminders},
    state::AppState,
    stores::{NotificationStore, TransactionStore},
};

/// A notification as rendered for clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationView {
    /// The ID of the notification.
    pub id: NotificationId,
    /// A short title.
    pub title: String,
    /// The message body.
    pub message: String,
    /// A free-form tag describing the kind of alert.
    pub kind: String,
    /// Whether the user has read the notification.
    pub is_read: bool,
    /// The transaction the notification refers to, if any.
    pub related_id: Option<TransactionId>,
    /// When the notification was created.
    pub created_at: OffsetDateTime,
}

impl From<&Notification> for NotificationView {
    fn from(notification: &Notification) -> Self {
        Self {
            id: notification.id,
            title: notification.title.clone(),
            message: notification.message.clone(),
            kind: notification.kind.clone(),
            is_read: notification.is_read,
            related_id: notification.related_id,
            created_at: notification.created_at,
        }
    }
}

/// The notification feed payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedView {
    /// The user's notifications, newest first.
    pub notifications: Vec<NotificationView>,
    /// The number of unread notifications.
    pub unread_count: usize,
}

/// A handler for reading the notification feed.
///
/// Before the feed is returned, reminders for scheduled payments due within
/// the next seven days are merged in. Reminders the feed has already seen are
/// not appended again, so a read reminder stays read.
pub async fn get_notifications(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserId>,
) -> Result<Json<FeedView>, Error> {
    let feed = state.notification_store.get_by_user(user_id)?;
    let transactions = state.transaction_store.get_by_user(user_id)?;
    let today = OffsetDateTime::now_utc().date();

    let unseen = merge_pushed(&feed, upcoming_payment_reminders(&transactions, today));
    let feed = if unseen.is_empty() {
        feed
    } else {
        for reminder in unseen {
            state.notification_store.create(reminder)?;
        }
        state.notification_store.get_by_user(user_id)?
    };

    Ok(Json(FeedView {
        unread_count: unread_count(&feed),
        notifications: feed.iter().map(NotificationView::from).collect(),
    }))
}

/// A handler for marking a single notification as read.
pub async fn put_notification_read(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserId>,
    Path(notification_id): Path<NotificationId>,
) -> Result<StatusCode, Error> {
    state.notification_store.mark_read(notification_id, user_id)?;

    Ok(StatusCode::NO_CONTENT)
}

/// A handler for marking all of the user's notifications as read.
pub async fn put_all_notifications_read(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserId>,
) -> Result<StatusCode, Error> {
    state.notification_store.mark_all_read(user_id)?;

    Ok(StatusCode::NO_CONTENT)
}

/// A handler for deleting a notification from the feed.
pub async fn delete_notification(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserId>,
    Path(notification_id): Path<NotificationId>,
) -> Result<StatusCode, Error> {
    state.notification_store.delete(notification_id, user_id)?;

    Ok(StatusCode::NO_CONTENT)
}
