//! The category endpoints: CRUD over a user's category set.
//!
//! Listing seeds the default set for first-time users, so a fresh account
//! always has somewhere to file a transaction.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    database_id::CategoryId,
    models::{Category, CategoryName, DEFAULT_CATEGORIES, NewCategory, UserId, validate_color},
    registry::ensure_seeded,
    state::AppState,
    stores::CategoryStore,
};

/// A category as rendered for clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryView {
    /// The ID of the category.
    pub id: CategoryId,
    /// The display name.
    pub name: String,
    /// The display hex color.
    pub color: String,
    /// An optional icon identifier.
    pub icon: Option<String>,
}

impl From<&Category> for CategoryView {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id,
            name: category.name.to_string(),
            color: category.color.clone(),
            icon: category.icon.clone(),
        }
    }
}

/// The fields a client submits to create or update a category.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryForm {
    /// The display name.
    pub name: String,
    /// The display hex color. When omitted on creation, a color is picked
    /// from the default palette; when omitted on update, the color is kept.
    #[serde(default)]
    pub color: Option<String>,
    /// An optional icon identifier.
    #[serde(default)]
    pub icon: Option<String>,
}

/// Pick a palette color for a user's `nth` category. Deterministic, so the
/// same sequence of creations always yields the same colors.
fn palette_color(nth: u32) -> String {
    DEFAULT_CATEGORIES[nth as usize % DEFAULT_CATEGORIES.len()]
        .color
        .to_owned()
}

/// A handler for listing all of the user's categories, seeding the default
/// set first if the user has none.
pub async fn get_categories(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserId>,
) -> Result<Json<Vec<CategoryView>>, Error> {
    ensure_seeded(&state.category_store, user_id)?;

    let categories = state.category_store.get_by_user(user_id)?;

    Ok(Json(categories.iter().map(CategoryView::from).collect()))
}

/// A handler for creating a category.
pub async fn create_category(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserId>,
    Json(form): Json<CategoryForm>,
) -> Result<(StatusCode, Json<CategoryView>), Error> {
    let name = CategoryName::new(&form.name)?;
    let color = match form.color {
        Some(color) => {
            validate_color(&color)?;
            color
        }
        None => palette_color(state.category_store.count_by_user(user_id)?),
    };

    let category = state.category_store.create(NewCategory {
        user_id,
        name,
        color,
        icon: form.icon,
    })?;

    Ok((StatusCode::CREATED, Json(CategoryView::from(&category))))
}

/// A handler for updating a category's name, color, and icon.
pub async fn put_category(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserId>,
    Path(category_id): Path<CategoryId>,
    Json(form): Json<CategoryForm>,
) -> Result<Json<CategoryView>, Error> {
    let name = CategoryName::new(&form.name)?;

    let existing = state
        .category_store
        .get_by_user(user_id)?
        .into_iter()
        .find(|category| category.id == category_id)
        .ok_or(Error::NotFound)?;

    let color = match form.color {
        Some(color) => {
            validate_color(&color)?;
            color
        }
        None => existing.color,
    };

    let category = state.category_store.update(Category {
        id: category_id,
        user_id,
        name,
        color,
        icon: form.icon.or(existing.icon),
    })?;

    Ok(Json(CategoryView::from(&category)))
}

/// A handler for deleting a category.
///
/// Transactions filed under the category are kept; their reference is
/// cleared and they resolve to the catch-all category from then on.
pub async fn delete_category(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserId>,
    Path(category_id): Path<CategoryId>,
) -> Result<StatusCode, Error> {
    state.category_store.delete(category_id, user_id)?;

    Ok(StatusCode::NO_CONTENT)
}
