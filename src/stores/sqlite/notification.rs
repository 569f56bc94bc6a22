//! The SQLite implementation of the notification store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};
use time::OffsetDateTime;

use crate::{
    Error,
    database_id::NotificationId,
    models::{NewNotification, Notification, UserId},
    stores::NotificationStore,
};

/// Stores notifications in a SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteNotificationStore {
    connection: Arc<Mutex<Connection>>,
}

impl SqliteNotificationStore {
    /// Create a store backed by `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl NotificationStore for SqliteNotificationStore {
    fn create(&self, new_notification: NewNotification) -> Result<Notification, Error> {
        let connection = self.connection.lock().map_err(|_| Error::DatabaseLockError)?;

        let notification = connection
            .prepare(
                "INSERT INTO notification (user_id, title, message, kind, related_id, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                 RETURNING id, user_id, title, message, kind, is_read, related_id, created_at",
            )?
            .query_row(
                (
                    new_notification.user_id.as_i64(),
                    &new_notification.title,
                    &new_notification.message,
                    &new_notification.kind,
                    new_notification.related_id,
                    OffsetDateTime::now_utc(),
                ),
                map_notification_row,
            )?;

        Ok(notification)
    }

    fn get_by_user(&self, user_id: UserId) -> Result<Vec<Notification>, Error> {
        let connection = self.connection.lock().map_err(|_| Error::DatabaseLockError)?;

        let notifications = connection
            .prepare(
                "SELECT id, user_id, title, message, kind, is_read, related_id, created_at
                 FROM notification
                 WHERE user_id = ?1
                 ORDER BY created_at DESC, id DESC",
            )?
            .query_map([user_id.as_i64()], map_notification_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(notifications)
    }

    fn mark_read(&self, id: NotificationId, user_id: UserId) -> Result<(), Error> {
        let connection = self.connection.lock().map_err(|_| Error::DatabaseLockError)?;

        let rows_affected = connection.execute(
            "UPDATE notification SET is_read = 1 WHERE id = ?1 AND user_id = ?2",
            (id, user_id.as_i64()),
        )?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }

    fn mark_all_read(&self, user_id: UserId) -> Result<(), Error> {
        let connection = self.connection.lock().map_err(|_| Error::DatabaseLockError)?;

        connection.execute(
            "UPDATE notification SET is_read = 1 WHERE user_id = ?1",
            [user_id.as_i64()],
        )?;

        Ok(())
    }

    fn delete(&self, id: NotificationId, user_id: UserId) -> Result<(), Error> {
        let connection = self.connection.lock().map_err(|_| Error::DatabaseLockError)?;

        let rows_affected = connection.execute(
            "DELETE FROM notification WHERE id = ?1 AND user_id = ?2",
            (id, user_id.as_i64()),
        )?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }
}

/// Map a database row to a [Notification].
fn map_notification_row(row: &Row) -> Result<Notification, rusqlite::Error> {
    Ok(Notification {
        id: row.get(0)?,
        user_id: UserId::new(row.get(1)?),
        title: row.get(2)?,
        message: row.get(3)?,
        kind: row.get(4)?,
        is_read: row.get(5)?,
        related_id: row.get(6)?,
        created_at: row.get(7)?,
    })
}
