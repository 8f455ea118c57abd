//! Category types and validation.

use hamyon_shared::types::{CategoryId, UserId};
use serde::Serialize;
use thiserror::Error;

use crate::transaction::TransactionKind;

/// Icon used when a category has none.
pub const DEFAULT_ICON: &str = "fas fa-folder";

/// Color used when a category has none.
pub const DEFAULT_COLOR: &str = "#3b82f6";

/// Maximum category name length in characters.
pub const MAX_NAME_LEN: usize = 100;

/// Errors from category validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CategoryError {
    /// Name is blank.
    #[error("Category name is required")]
    EmptyName,

    /// Name is longer than `MAX_NAME_LEN`.
    #[error("Category name must be at most 100 characters")]
    NameTooLong,

    /// Color is not a `#rrggbb` hex string.
    #[error("Invalid color: {0}. Expected #rrggbb")]
    InvalidColor(String),
}

/// A grouping key for transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryInfo {
    /// Category ID.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Icon class.
    pub icon: String,
    /// Hex color.
    pub color: String,
    /// Which transactions the category applies to.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Owner; `None` for shared default categories.
    pub owner: Option<UserId>,
}

impl CategoryInfo {
    /// Returns true if the category belongs to everyone.
    #[must_use]
    pub const fn is_shared(&self) -> bool {
        self.owner.is_none()
    }
}

/// Trims and validates a category name.
pub fn normalize_name(name: &str) -> Result<String, CategoryError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CategoryError::EmptyName);
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(CategoryError::NameTooLong);
    }
    Ok(name.to_string())
}

/// Validates a `#rrggbb` color, falling back to `DEFAULT_COLOR` when absent.
pub fn normalize_color(color: Option<&str>) -> Result<String, CategoryError> {
    let Some(color) = color.map(str::trim).filter(|c| !c.is_empty()) else {
        return Ok(DEFAULT_COLOR.to_string());
    };
    let valid = color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit());
    if !valid {
        return Err(CategoryError::InvalidColor(color.to_string()));
    }
    Ok(color.to_lowercase())
}

/// Returns the icon, falling back to `DEFAULT_ICON` when absent.
#[must_use]
pub fn normalize_icon(icon: Option<&str>) -> String {
    icon.map(str::trim)
        .filter(|i| !i.is_empty())
        .unwrap_or(DEFAULT_ICON)
        .to_string()
}
