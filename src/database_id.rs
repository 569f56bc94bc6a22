//! Database ID type definitions.

/// Alias for the integer type used for mapping to database IDs.
pub type DatabaseId = i64;
/// The ID of a transaction row.
pub type TransactionId = i64;
/// The ID of a category row.
pub type CategoryId = i64;
/// The ID of a notification row.
pub type NotificationId = i64;
