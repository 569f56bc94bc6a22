//! Defines the transaction store trait.

use crate::{
    Error,
    database_id::TransactionId,
    models::{Transaction, TransactionBuilder, TransactionStatus, TransactionUpdate, UserId},
};

/// Handles the creation, retrieval, and mutation of transactions.
///
/// Every operation is scoped to one user; implementers must never return or
/// write another user's rows.
pub trait TransactionStore {
    /// Create a new transaction in the store from a builder.
    ///
    /// The store assigns the ID and the `created_at`/`updated_at` timestamps,
    /// and applies the builder's initial status (pending for scheduled
    /// payments without an explicit status, paid otherwise).
    fn create(&self, builder: TransactionBuilder) -> Result<Transaction, Error>;

    /// Retrieve a transaction owned by `user_id` from the store.
    fn get(&self, id: TransactionId, user_id: UserId) -> Result<Transaction, Error>;

    /// Retrieve all of a user's transactions, most recent date first.
    fn get_by_user(&self, user_id: UserId) -> Result<Vec<Transaction>, Error>;

    /// Overwrite the user-editable fields of a transaction.
    fn update(&self, update: TransactionUpdate) -> Result<Transaction, Error>;

    /// Change the status of a transaction, leaving other fields untouched.
    fn set_status(
        &self,
        id: TransactionId,
        user_id: UserId,
        status: TransactionStatus,
    ) -> Result<Transaction, Error>;

    /// Delete a transaction. Deletion is immediate and irreversible.
    fn delete(&self, id: TransactionId, user_id: UserId) -> Result<(), Error>;
}
