//! The domain models of the application.

mod category;
mod notification;
mod password;
mod transaction;
mod user;

pub use category::{
    Category, CategoryName, DEFAULT_CATEGORIES, DefaultCategory, FALLBACK_CATEGORY_COLOR,
    FALLBACK_CATEGORY_NAME, FALLBACK_CATEGORY_SLUG, NewCategory, validate_color,
};
pub use notification::{NewNotification, Notification};
pub use password::{PasswordHash, ValidatedPassword};
pub use transaction::{
    PaymentMethod, Transaction, TransactionBuilder, TransactionKind, TransactionStatus,
    TransactionUpdate,
};
pub use user::{Profile, UserId};
