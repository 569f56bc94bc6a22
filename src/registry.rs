//! Category resolution for view models.
//!
//! Transactions may reference a category that has since been deleted, or none
//! at all. View models still need a name and color for every row, so lookups
//! go through a [CategoryRegistry] that falls back to the catch-all "Outros"
//! category instead of failing.

use serde::Serialize;

use crate::{
    Error,
    database_id::CategoryId,
    models::{
        Category, CategoryName, DEFAULT_CATEGORIES, FALLBACK_CATEGORY_COLOR,
        FALLBACK_CATEGORY_NAME, FALLBACK_CATEGORY_SLUG, NewCategory, UserId,
    },
    stores::CategoryStore,
};

/// The display fields of a resolved category reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedCategory {
    /// The category ID rendered for the client: the decimal database ID, or
    /// the fallback slug when the reference did not resolve.
    pub id: String,
    /// The display name.
    pub name: String,
    /// The display hex color.
    pub color: String,
}

impl ResolvedCategory {
    fn fallback() -> Self {
        Self {
            id: FALLBACK_CATEGORY_SLUG.to_owned(),
            name: FALLBACK_CATEGORY_NAME.to_owned(),
            color: FALLBACK_CATEGORY_COLOR.to_owned(),
        }
    }
}

/// An in-memory snapshot of a user's categories, used to resolve category
/// references while building view models.
#[derive(Debug, Clone)]
pub struct CategoryRegistry {
    categories: Vec<Category>,
}

impl CategoryRegistry {
    /// Create a registry over a user's categories.
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// Load a registry with all of `user_id`'s categories, seeding the
    /// default set first if the user has none.
    pub fn load(store: &impl CategoryStore, user_id: UserId) -> Result<Self, Error> {
        ensure_seeded(store, user_id)?;

        Ok(Self::new(store.get_by_user(user_id)?))
    }

    /// Resolve a category reference. Never fails: a missing or dangling
    /// reference resolves to the catch-all category.
    pub fn lookup(&self, category_id: Option<CategoryId>) -> ResolvedCategory {
        category_id
            .and_then(|id| self.categories.iter().find(|category| category.id == id))
            .map(|category| ResolvedCategory {
                id: category.id.to_string(),
                name: category.name.to_string(),
                color: category.color.clone(),
            })
            .unwrap_or_else(ResolvedCategory::fallback)
    }
}

/// Insert the default category set for `user_id` if they have no categories
/// yet. Users who have created or deleted categories are left alone.
pub fn ensure_seeded(store: &impl CategoryStore, user_id: UserId) -> Result<(), Error> {
    if store.count_by_user(user_id)? > 0 {
        return Ok(());
    }

    for default_category in &DEFAULT_CATEGORIES {
        store.create(NewCategory {
            user_id,
            name: CategoryName::new_unchecked(default_category.name),
            color: default_category.color.to_owned(),
            icon: None,
        })?;
    }

    Ok(())
}
