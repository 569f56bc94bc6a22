//! Implements the struct that holds the state of the JSON API server.

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use rusqlite::Connection;
use sha2::{Digest, Sha512};
use time::Duration;

use crate::{
    Error,
    auth::cookie::DEFAULT_COOKIE_DURATION,
    db::initialize,
    stores::sqlite::{
        SqliteCategoryStore, SqliteNotificationStore, SqliteProfileStore, SqliteTransactionStore,
    },
};

/// The state of the API server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,

    /// The duration for which cookies used for authentication are valid.
    pub cookie_duration: Duration,

    /// Creates and retrieves transactions.
    pub transaction_store: SqliteTransactionStore,

    /// Creates and retrieves categories.
    pub category_store: SqliteCategoryStore,

    /// Appends to and reads notification feeds.
    pub notification_store: SqliteNotificationStore,

    /// Creates and retrieves user profiles.
    pub profile_store: SqliteProfileStore,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the
    /// domain models.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_connection: Connection, cookie_secret: &str) -> Result<Self, Error> {
        initialize(&db_connection)?;

        let connection = Arc::new(Mutex::new(db_connection));

        Ok(Self {
            cookie_key: create_cookie_key(cookie_secret),
            cookie_duration: DEFAULT_COOKIE_DURATION,
            transaction_store: SqliteTransactionStore::new(connection.clone()),
            category_store: SqliteCategoryStore::new(connection.clone()),
            notification_store: SqliteNotificationStore::new(connection.clone()),
            profile_store: SqliteProfileStore::new(connection),
        })
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

/// Create a signing key for cookies from a `secret` string.
pub fn create_cookie_key(secret: &str) -> Key {
    let hash = Sha512::digest(secret);

    Key::from(&hash)
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use super::{AppState, create_cookie_key};

    #[test]
    fn new_initializes_database() {
        let state = AppState::new(Connection::open_in_memory().unwrap(), "42")
            .expect("Could not create app state");

        assert!(state.cookie_duration.is_positive());
    }

    #[test]
    fn cookie_key_is_deterministic_for_a_secret() {
        assert_eq!(
            create_cookie_key("42").master(),
            create_cookie_key("42").master()
        );
        assert_ne!(
            create_cookie_key("42").master(),
            create_cookie_key("43").master()
        );
    }
}
