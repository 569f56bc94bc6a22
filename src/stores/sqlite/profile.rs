//! The SQLite implementation of the profile store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};
use time::OffsetDateTime;

use crate::{
    Error,
    models::{PasswordHash, Profile, UserId},
    stores::ProfileStore,
};

/// Stores user profiles in a SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteProfileStore {
    connection: Arc<Mutex<Connection>>,
}

impl SqliteProfileStore {
    /// Create a store backed by `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl ProfileStore for SqliteProfileStore {
    fn create(
        &self,
        email: &str,
        full_name: &str,
        password_hash: PasswordHash,
    ) -> Result<Profile, Error> {
        let connection = self.connection.lock().map_err(|_| Error::DatabaseLockError)?;

        connection
            .prepare(
                "INSERT INTO profile (email, full_name, password_hash, created_at)
                 VALUES (?1, ?2, ?3, ?4)
                 RETURNING id, email, full_name, password_hash, created_at",
            )?
            .query_row(
                (
                    email,
                    full_name,
                    password_hash.to_string(),
                    OffsetDateTime::now_utc(),
                ),
                map_profile_row,
            )
            .map_err(|error| match error {
                rusqlite::Error::SqliteFailure(sqlite_error, Some(ref description))
                    if sqlite_error.extended_code
                        == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                        && description.contains("email") =>
                {
                    Error::DuplicateEmail
                }
                error => error.into(),
            })
    }

    fn get(&self, id: UserId) -> Result<Profile, Error> {
        let connection = self.connection.lock().map_err(|_| Error::DatabaseLockError)?;

        let profile = connection
            .prepare(
                "SELECT id, email, full_name, password_hash, created_at
                 FROM profile WHERE id = ?1",
            )?
            .query_row([id.as_i64()], map_profile_row)?;

        Ok(profile)
    }

    fn get_by_email(&self, email: &str) -> Result<Profile, Error> {
        let connection = self.connection.lock().map_err(|_| Error::DatabaseLockError)?;

        let profile = connection
            .prepare(
                "SELECT id, email, full_name, password_hash, created_at
                 FROM profile WHERE email = ?1",
            )?
            .query_row([email], map_profile_row)?;

        Ok(profile)
    }

    fn update_full_name(&self, id: UserId, full_name: &str) -> Result<Profile, Error> {
        let connection = self.connection.lock().map_err(|_| Error::DatabaseLockError)?;

        let profile = connection
            .prepare(
                "UPDATE profile SET full_name = ?2 WHERE id = ?1
                 RETURNING id, email, full_name, password_hash, created_at",
            )?
            .query_row((id.as_i64(), full_name), map_profile_row)?;

        Ok(profile)
    }

    fn update_password(&self, id: UserId, password_hash: PasswordHash) -> Result<(), Error> {
        let connection = self.connection.lock().map_err(|_| Error::DatabaseLockError)?;

        let rows_affected = connection.execute(
            "UPDATE profile SET password_hash = ?2 WHERE id = ?1",
            (id.as_i64(), password_hash.to_string()),
        )?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }
}

/// Map a database row to a [Profile].
fn map_profile_row(row: &Row) -> Result<Profile, rusqlite::Error> {
    let password_hash: String = row.get(3)?;

    Ok(Profile {
        id: UserId::new(row.get(0)?),
        email: row.get(1)?,
        full_name: row.get(2)?,
        password_hash: PasswordHash::new_unchecked(&password_hash),
        created_at: row.get(4)?,
    })
}
