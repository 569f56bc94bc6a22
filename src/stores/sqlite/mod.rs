//! SQLite implementations of the store traits.
//!
//! Each store holds a clone of the application's shared connection and locks
//! it per operation. Mutation is therefore serialized through the stores; no
//! other locking is needed.

mod category;
mod notification;
mod profile;
mod transaction;

pub use category::SqliteCategoryStore;
pub use notification::SqliteNotificationStore;
pub use profile::SqliteProfileStore;
pub use transaction::SqliteTransactionStore;
