//! Drink category model and the filter used by every rollup query

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a drink category
pub type CategoryId = Uuid;

/// A drink category that entries are logged against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Unique category identifier
    pub id: CategoryId,
    /// Display name, unique among enabled categories
    pub name: String,
    /// Disabled categories keep their entries but drop out of rollups
    pub enabled: bool,
    /// Built-in categories ship with the app and cannot be removed
    pub builtin: bool,
    /// Display color as a hex string, e.g. "#44A5E8"
    pub color: String,
    /// Whether the user has picked a color different from the default
    pub color_changed: bool,
}

impl Category {
    /// Creates a user-defined category, enabled by default
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            enabled: true,
            builtin: false,
            color: color.into(),
            color_changed: false,
        }
    }

    /// Creates a built-in category with its stock color
    pub fn builtin(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            builtin: true,
            ..Self::new(name, color)
        }
    }
}

/// Scope of a rollup query: everything that is enabled, or one category
///
/// `Total` never names a category, so a query can only disagree with the
/// entries it matches by construction, not at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryFilter {
    /// All enabled categories combined
    Total,
    /// A single category
    Only(CategoryId),
}

impl CategoryFilter {
    /// Whether an entry logged against `category` falls inside this filter
    pub fn matches(&self, category: CategoryId) -> bool {
        match self {
            CategoryFilter::Total => true,
            CategoryFilter::Only(id) => *id == category,
        }
    }

    pub fn is_total(&self) -> bool {
        matches!(self, CategoryFilter::Total)
    }
}
