//! This file defines the `Category` type, the default category set seeded for
//! new users, and the fallback category contract.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    database_id::CategoryId,
    models::UserId,
};

/// The slug reported for the fallback category in view models.
pub const FALLBACK_CATEGORY_SLUG: &str = "outros";
/// The display name of the fallback category.
pub const FALLBACK_CATEGORY_NAME: &str = "Outros";
/// The display color of the fallback category.
pub const FALLBACK_CATEGORY_COLOR: &str = "#607D8B";

/// A default category seeded for users that have none yet.
pub struct DefaultCategory {
    /// The display name.
    pub name: &'static str,
    /// The display hex color.
    pub color: &'static str,
}

/// The categories seeded on first use: six expense categories, two income
/// categories, and the catch-all.
pub const DEFAULT_CATEGORIES: [DefaultCategory; 9] = [
    DefaultCategory { name: "Alimentação", color: "#FF8042" },
    DefaultCategory { name: "Transporte", color: "#00C49F" },
    DefaultCategory { name: "Moradia", color: "#0088FE" },
    DefaultCategory { name: "Lazer", color: "#FFBB28" },
    DefaultCategory { name: "Saúde", color: "#FF0000" },
    DefaultCategory { name: "Educação", color: "#9C27B0" },
    DefaultCategory { name: "Salário", color: "#4CAF50" },
    DefaultCategory { name: "Investimentos", color: "#2196F3" },
    DefaultCategory { name: FALLBACK_CATEGORY_NAME, color: FALLBACK_CATEGORY_COLOR },
];

/// The name of a category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name.
    ///
    /// # Errors
    ///
    /// This function will return an error if `name` is an empty string.
    pub fn new(name: &str) -> Result<Self, Error> {
        if name.trim().is_empty() {
            Err(Error::EmptyName)
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a category name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    ///
    /// This function has `_unchecked` in the name but is not `unsafe`, because
    /// if the non-empty invariant is violated it will cause incorrect
    /// behaviour but not affect memory safety.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user-defined category for expenses and income, e.g. "Alimentação",
/// "Transporte", "Salário".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// The ID of the category.
    pub id: CategoryId,
    /// The ID of the user who owns the category.
    pub user_id: UserId,
    /// The display name.
    pub name: CategoryName,
    /// The display color as a `#RRGGBB` hex string.
    pub color: String,
    /// An optional icon identifier.
    pub icon: Option<String>,
}

/// The fields needed to create a category.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    /// The ID of the user who will own the category.
    pub user_id: UserId,
    /// The display name.
    pub name: CategoryName,
    /// The display color as a `#RRGGBB` hex string.
    pub color: String,
    /// An optional icon identifier.
    pub icon: Option<String>,
}

/// Check that `color` is a hex color of the form `#RRGGBB`.
///
/// # Errors
///
/// Returns [Error::InvalidColor] if the string has the wrong shape.
pub fn validate_color(color: &str) -> Result<(), Error> {
    let is_valid = color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit());

    if is_valid {
        Ok(())
    } else {
        Err(Error::InvalidColor(color.to_owned()))
    }
}
