//! Contains traits and implementations for objects that store the domain
//! [models](crate::models).
//!
//! The traits are the contract the rest of the application consumes; the
//! [sqlite] module implements them over a shared SQLite connection.

mod category;
mod notification;
mod profile;
mod transaction;

pub mod sqlite;

pub use category::CategoryStore;
pub use notification::NotificationStore;
pub use profile::ProfileStore;
pub use transaction::TransactionStore;
