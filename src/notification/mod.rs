//! The notification feed: reminders about scheduled payments and the
//! endpoints for reading and clearing them.

mod endpoints;
mod feed;

pub use endpoints::{
    delete_notification, get_notifications, put_all_notifications_read, put_notification_read,
};
pub use feed::{merge_pushed, unread_count, upcoming_payment_reminders};
