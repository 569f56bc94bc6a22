//! The SQLite implementation of the transaction store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row, types::Type};
use time::OffsetDateTime;

use crate::{
    Error,
    database_id::TransactionId,
    models::{
        PaymentMethod, Transaction, TransactionBuilder, TransactionStatus, TransactionUpdate,
        UserId,
    },
    stores::TransactionStore,
};

/// Stores transactions in a SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SqliteTransactionStore {
    /// Create a store backed by `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

const TRANSACTION_COLUMNS: &str = "id, user_id, name, description, amount, date, category_id, \
     payment_method, is_scheduled, status, created_at, updated_at";

impl TransactionStore for SqliteTransactionStore {
    fn create(&self, builder: TransactionBuilder) -> Result<Transaction, Error> {
        let connection = self.connection.lock().map_err(|_| Error::DatabaseLockError)?;
        let now = OffsetDateTime::now_utc();
        let status = builder.initial_status();

        let transaction = connection
            .prepare(&format!(
                "INSERT INTO \"transaction\" (user_id, name, description, amount, date, \
                 category_id, payment_method, is_scheduled, status, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
                 RETURNING {TRANSACTION_COLUMNS}"
            ))?
            .query_row(
                (
                    builder.user_id.as_i64(),
                    &builder.name,
                    &builder.description,
                    builder.amount,
                    builder.date,
                    builder.category_id,
                    builder.payment_method.as_str(),
                    builder.is_scheduled,
                    status.as_str(),
                    now,
                    now,
                ),
                map_transaction_row,
            )
            .map_err(|error| match error {
                rusqlite::Error::SqliteFailure(
                    rusqlite::ffi::Error {
                        code: _,
                        extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
                    },
                    _,
                ) => Error::InvalidCategory(builder.category_id),
                error => error.into(),
            })?;

        Ok(transaction)
    }

    fn get(&self, id: TransactionId, user_id: UserId) -> Result<Transaction, Error> {
        let connection = self.connection.lock().map_err(|_| Error::DatabaseLockError)?;

        let transaction = connection
            .prepare(&format!(
                "SELECT {TRANSACTION_COLUMNS} FROM \"transaction\"
                 WHERE id = ?1 AND user_id = ?2"
            ))?
            .query_row((id, user_id.as_i64()), map_transaction_row)?;

        Ok(transaction)
    }

    fn get_by_user(&self, user_id: UserId) -> Result<Vec<Transaction>, Error> {
        let connection = self.connection.lock().map_err(|_| Error::DatabaseLockError)?;

        let transactions = connection
            .prepare(&format!(
                "SELECT {TRANSACTION_COLUMNS} FROM \"transaction\"
                 WHERE user_id = ?1
                 ORDER BY date DESC, id DESC"
            ))?
            .query_map([user_id.as_i64()], map_transaction_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(transactions)
    }

    fn update(&self, update: TransactionUpdate) -> Result<Transaction, Error> {
        let connection = self.connection.lock().map_err(|_| Error::DatabaseLockError)?;

        let transaction = connection
            .prepare(&format!(
                "UPDATE \"transaction\"
                 SET name = ?3, description = ?4, amount = ?5, date = ?6, category_id = ?7,
                     payment_method = ?8, is_scheduled = ?9, status = ?10, updated_at = ?11
                 WHERE id = ?1 AND user_id = ?2
                 RETURNING {TRANSACTION_COLUMNS}"
            ))?
            .query_row(
                (
                    update.id,
                    update.user_id.as_i64(),
                    &update.name,
                    &update.description,
                    update.amount,
                    update.date,
                    update.category_id,
                    update.payment_method.as_str(),
                    update.is_scheduled,
                    update.status.as_str(),
                    OffsetDateTime::now_utc(),
                ),
                map_transaction_row,
            )
            .map_err(|error| match error {
                rusqlite::Error::SqliteFailure(
                    rusqlite::ffi::Error {
                        code: _,
                        extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
                    },
                    _,
                ) => Error::InvalidCategory(update.category_id),
                error => error.into(),
            })?;

        Ok(transaction)
    }

    fn set_status(
        &self,
        id: TransactionId,
        user_id: UserId,
        status: TransactionStatus,
    ) -> Result<Transaction, Error> {
        let connection = self.connection.lock().map_err(|_| Error::DatabaseLockError)?;

        let transaction = connection
            .prepare(&format!(
                "UPDATE \"transaction\" SET status = ?3, updated_at = ?4
                 WHERE id = ?1 AND user_id = ?2
                 RETURNING {TRANSACTION_COLUMNS}"
            ))?
            .query_row(
                (id, user_id.as_i64(), status.as_str(), OffsetDateTime::now_utc()),
                map_transaction_row,
            )?;

        Ok(transaction)
    }

    fn delete(&self, id: TransactionId, user_id: UserId) -> Result<(), Error> {
        let connection = self.connection.lock().map_err(|_| Error::DatabaseLockError)?;

        let rows_affected = connection.execute(
            "DELETE FROM \"transaction\" WHERE id = ?1 AND user_id = ?2",
            (id, user_id.as_i64()),
        )?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }
}

/// Map a database row to a [Transaction].
///
/// **Note:** expects the columns in the order of `TRANSACTION_COLUMNS`.
pub(crate) fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let payment_method: String = row.get(7)?;
    let payment_method = payment_method.parse::<PaymentMethod>().map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(7, Type::Text, Box::new(error))
    })?;

    let status: String = row.get(9)?;
    let status = status.parse::<TransactionStatus>().map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(9, Type::Text, Box::new(error))
    })?;

    Ok(Transaction {
        id: row.get(0)?,
        user_id: UserId::new(row.get(1)?),
        name: row.get(2)?,
        description: row.get(3)?,
        amount: row.get(4)?,
        date: row.get(5)?,
        category_id: row.get(6)?,
        payment_method,
        is_scheduled: row.get(8)?,
        status,
        created_at: row.get(10)?,
        updated_at: row.get(11)?,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        db::initialize,
        models::{
            PasswordHash, PaymentMethod, Transaction, TransactionStatus, TransactionUpdate,
            UserId,
        },
        stores::{ProfileStore, TransactionStore, sqlite::SqliteProfileStore},
    };

    use super::SqliteTransactionStore;

    fn get_test_store() -> (SqliteTransactionStore, UserId) {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        let connection = Arc::new(Mutex::new(connection));

        let profile = SqliteProfileStore::new(connection.clone())
            .create(
                "test@test.com",
                "Test",
                PasswordHash::new_unchecked("notarealhash"),
            )
            .unwrap();

        (SqliteTransactionStore::new(connection), profile.id)
    }

    #[test]
    fn create_assigns_defaults() {
        let (store, user_id) = get_test_store();

        let transaction = store
            .create(
                Transaction::build(user_id, -45.99, date!(2024 - 03 - 15), "Mercado")
                    .payment_method(PaymentMethod::Pix),
            )
            .expect("Could not create transaction");

        assert_eq!(transaction.amount, -45.99);
        assert_eq!(transaction.status, TransactionStatus::Paid);
        assert_eq!(transaction.payment_method, PaymentMethod::Pix);
        assert!(!transaction.is_scheduled);
    }

    #[test]
    fn create_scheduled_defaults_to_pending() {
        let (store, user_id) = get_test_store();

        let transaction = store
            .create(
                Transaction::build(user_id, -100.0, date!(2024 - 03 - 20), "Aluguel")
                    .scheduled(true),
            )
            .expect("Could not create transaction");

        assert_eq!(transaction.status, TransactionStatus::Pending);
    }

    #[test]
    fn create_fails_on_invalid_category_id() {
        let (store, user_id) = get_test_store();

        let result = store.create(
            Transaction::build(user_id, -1.0, date!(2024 - 03 - 15), "Mercado")
                .category_id(Some(42)),
        );

        assert_eq!(result, Err(Error::InvalidCategory(Some(42))));
    }

    #[test]
    fn get_by_user_is_scoped_and_sorted() {
        let (store, user_id) = get_test_store();
        store
            .create(Transaction::build(user_id, 100.0, date!(2024 - 03 - 01), "Salário"))
            .unwrap();
        store
            .create(Transaction::build(user_id, -50.0, date!(2024 - 03 - 10), "Mercado"))
            .unwrap();

        let transactions = store.get_by_user(user_id).unwrap();

        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[0].date, date!(2024 - 03 - 10));
        assert_eq!(transactions[1].date, date!(2024 - 03 - 01));

        let other_user = store.get_by_user(UserId::new(999)).unwrap();
        assert!(other_user.is_empty());
    }

    #[test]
    fn round_trip_preserves_sign_and_date() {
        let (store, user_id) = get_test_store();

        let created = store
            .create(Transaction::build(user_id, -45.99, date!(2024 - 03 - 15), "Mercado"))
            .unwrap();
        let fetched = store.get(created.id, user_id).unwrap();

        assert_eq!(fetched.amount, -45.99);
        assert!(fetched.amount <= 0.0);
        assert_eq!(fetched.date, date!(2024 - 03 - 15));
    }

    #[test]
    fn update_overwrites_editable_fields() {
        let (store, user_id) = get_test_store();
        let created = store
            .create(Transaction::build(user_id, -10.0, date!(2024 - 03 - 15), "Café"))
            .unwrap();

        let updated = store
            .update(TransactionUpdate {
                id: created.id,
                user_id,
                name: "Padaria".to_owned(),
                description: "Café e pão".to_owned(),
                amount: -12.5,
                date: date!(2024 - 03 - 16),
                category_id: None,
                payment_method: PaymentMethod::DebitCard,
                is_scheduled: false,
                status: TransactionStatus::Paid,
            })
            .expect("Could not update transaction");

        assert_eq!(updated.name, "Padaria");
        assert_eq!(updated.amount, -12.5);
        assert_eq!(updated.date, date!(2024 - 03 - 16));
    }

    #[test]
    fn set_status_changes_only_status() {
        let (store, user_id) = get_test_store();
        let created = store
            .create(
                Transaction::build(user_id, -100.0, date!(2024 - 03 - 20), "Aluguel")
                    .scheduled(true),
            )
            .unwrap();

        let updated = store
            .set_status(created.id, user_id, TransactionStatus::Paid)
            .expect("Could not set status");

        assert_eq!(updated.status, TransactionStatus::Paid);
        assert_eq!(updated.amount, created.amount);
        assert_eq!(updated.date, created.date);
    }

    #[test]
    fn delete_removes_row() {
        let (store, user_id) = get_test_store();
        let created = store
            .create(Transaction::build(user_id, -10.0, date!(2024 - 03 - 15), "Café"))
            .unwrap();

        store.delete(created.id, user_id).expect("Could not delete");

        assert_eq!(store.get(created.id, user_id), Err(Error::NotFound));
    }

    #[test]
    fn delete_fails_for_other_users_rows() {
        let (store, user_id) = get_test_store();
        let created = store
            .create(Transaction::build(user_id, -10.0, date!(2024 - 03 - 15), "Café"))
            .unwrap();

        let result = store.delete(created.id, UserId::new(999));

        assert_eq!(result, Err(Error::NotFound));
        assert!(store.get(created.id, user_id).is_ok());
    }
}
