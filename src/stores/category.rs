//! Defines the category store trait.

use crate::{
    Error,
    database_id::CategoryId,
    models::{Category, NewCategory, UserId},
};

/// Creates and retrieves transaction categories.
pub trait CategoryStore {
    /// Create a new category and add it to the store.
    fn create(&self, new_category: NewCategory) -> Result<Category, Error>;

    /// Get all categories for a given user, ordered by name.
    fn get_by_user(&self, user_id: UserId) -> Result<Vec<Category>, Error>;

    /// The number of categories the user has.
    fn count_by_user(&self, user_id: UserId) -> Result<u32, Error>;

    /// Overwrite the name, color, and icon of a category.
    fn update(&self, category: Category) -> Result<Category, Error>;

    /// Delete a category.
    ///
    /// Transactions referencing the category are kept; their category
    /// reference is cleared by the store and resolves to the fallback
    /// category at read time.
    fn delete(&self, id: CategoryId, user_id: UserId) -> Result<(), Error>;
}
