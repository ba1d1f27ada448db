//! In-memory store
//!
//! Single-writer owner of categories and entries. Rollups read it through
//! the `EventSource` seam and never mutate; every mutation goes through a
//! method here so the store invariants hold in one place:
//! - category names are unique among enabled categories
//! - entry amounts are never negative
//! - deleting a category deletes its entries with it

pub mod settings;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::models::{Category, CategoryId, Entry, EntryId};

/// Stock categories seeded on first run
const DEFAULT_CATEGORIES: [(&str, &str); 4] = [
    ("Water", "#44A5E8"),
    ("Coffee", "#8C6248"),
    ("Soda", "#6BBE6C"),
    ("Juice", "#F2A33C"),
];

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Unknown category: {0}")]
    UnknownCategory(CategoryId),

    #[error("Unknown entry: {0}")]
    UnknownEntry(EntryId),

    #[error("Category name already in use: {0}")]
    DuplicateName(String),

    #[error("Built-in category cannot be removed: {0}")]
    BuiltinCategory(String),

    #[error("Amount must not be negative, got {0}")]
    NegativeAmount(f64),

    #[error("Rescale factor must be positive, got {0}")]
    NonPositiveFactor(f64),

    #[error("Daily goal must be positive, got {0}")]
    NonPositiveGoal(f64),
}

/// Read seam the rollup engine works against
pub trait EventSource {
    /// Every logged entry, in insertion order
    fn entries(&self) -> &[Entry];

    /// Whether a category currently participates in rollups
    fn is_enabled(&self, category: CategoryId) -> bool;
}

/// Owns all logged data
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Store {
    categories: Vec<Category>,
    entries: Vec<Entry>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with the stock drink categories
    pub fn with_defaults() -> Self {
        let mut store = Self::new();
        store.seed_defaults();
        store
    }

    /// Adds any stock category that is missing; safe to call repeatedly
    pub fn seed_defaults(&mut self) {
        for (name, color) in DEFAULT_CATEGORIES {
            if !self.categories.iter().any(|c| c.name == name) {
                debug!("Seeding stock category {}", name);
                self.categories.push(Category::builtin(name, color));
            }
        }
    }

    // ============================================================
    // Reads
    // ============================================================

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn enabled_categories(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter().filter(|c| c.enabled)
    }

    /// Looks a category up by display name among the enabled ones
    pub fn category_by_name(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.enabled && c.name == name)
    }

    pub fn entry(&self, id: EntryId) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    // ============================================================
    // Category mutations
    // ============================================================

    pub fn add_category(
        &mut self,
        name: impl Into<String>,
        color: impl Into<String>,
    ) -> Result<CategoryId, StoreError> {
        let name = name.into();
        self.ensure_name_free(&name, None)?;
        let category = Category::new(name, color);
        let id = category.id;
        info!("Added category {} ({})", category.name, id);
        self.categories.push(category);
        Ok(id)
    }

    pub fn rename_category(
        &mut self,
        id: CategoryId,
        name: impl Into<String>,
    ) -> Result<(), StoreError> {
        let name = name.into();
        self.ensure_name_free(&name, Some(id))?;
        let category = self.category_mut(id)?;
        debug!("Renaming category {} to {}", category.name, name);
        category.name = name;
        Ok(())
    }

    /// Enables or disables a category without touching its entries
    ///
    /// Re-enabling fails if the name was taken by another enabled category
    /// in the meantime.
    pub fn set_enabled(&mut self, id: CategoryId, enabled: bool) -> Result<(), StoreError> {
        if enabled {
            let name = self
                .category(id)
                .ok_or(StoreError::UnknownCategory(id))?
                .name
                .clone();
            self.ensure_name_free(&name, Some(id))?;
        }
        let category = self.category_mut(id)?;
        category.enabled = enabled;
        debug!("Category {} enabled={}", category.name, enabled);
        Ok(())
    }

    pub fn recolor_category(
        &mut self,
        id: CategoryId,
        color: impl Into<String>,
    ) -> Result<(), StoreError> {
        let category = self.category_mut(id)?;
        category.color = color.into();
        category.color_changed = true;
        Ok(())
    }

    /// Removes a user-defined category and every entry logged against it,
    /// returning how many entries went with it
    pub fn delete_category(&mut self, id: CategoryId) -> Result<usize, StoreError> {
        let index = self
            .categories
            .iter()
            .position(|c| c.id == id)
            .ok_or(StoreError::UnknownCategory(id))?;
        if self.categories[index].builtin {
            return Err(StoreError::BuiltinCategory(self.categories[index].name.clone()));
        }
        let removed = self.categories.remove(index);
        let before = self.entries.len();
        self.entries.retain(|e| e.category != id);
        let dropped = before - self.entries.len();
        info!("Removed category {} and {} of its entries", removed.name, dropped);
        Ok(dropped)
    }

    // ============================================================
    // Entry mutations
    // ============================================================

    pub fn log_entry(
        &mut self,
        category: CategoryId,
        amount: f64,
        at: NaiveDateTime,
    ) -> Result<EntryId, StoreError> {
        if self.category(category).is_none() {
            return Err(StoreError::UnknownCategory(category));
        }
        if amount < 0.0 {
            return Err(StoreError::NegativeAmount(amount));
        }
        let entry = Entry::new(category, amount, at);
        let id = entry.id;
        debug!("Logged {} at {}", amount, at);
        self.entries.push(entry);
        Ok(id)
    }

    pub fn edit_entry_amount(&mut self, id: EntryId, amount: f64) -> Result<(), StoreError> {
        if amount < 0.0 {
            return Err(StoreError::NegativeAmount(amount));
        }
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(StoreError::UnknownEntry(id))?;
        entry.amount = amount;
        Ok(())
    }

    pub fn remove_entry(&mut self, id: EntryId) -> Result<Entry, StoreError> {
        let index = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(StoreError::UnknownEntry(id))?;
        Ok(self.entries.remove(index))
    }

    /// Multiplies every stored amount, used when the unit system changes
    pub fn rescale_amounts(&mut self, factor: f64) -> Result<(), StoreError> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(StoreError::NonPositiveFactor(factor));
        }
        for entry in &mut self.entries {
            entry.amount *= factor;
        }
        info!("Rescaled {} entries by {}", self.entries.len(), factor);
        Ok(())
    }

    // ============================================================
    // Internal
    // ============================================================

    fn category_mut(&mut self, id: CategoryId) -> Result<&mut Category, StoreError> {
        self.categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(StoreError::UnknownCategory(id))
    }

    /// Rejects a name already used by an enabled category other than `except`
    fn ensure_name_free(
        &self,
        name: &str,
        except: Option<CategoryId>,
    ) -> Result<(), StoreError> {
        let taken = self
            .categories
            .iter()
            .any(|c| c.enabled && c.name == name && Some(c.id) != except);
        if taken {
            return Err(StoreError::DuplicateName(name.to_string()));
        }
        Ok(())
    }
}

impl EventSource for Store {
    fn entries(&self) -> &[Entry] {
        &self.entries
    }

    fn is_enabled(&self, category: CategoryId) -> bool {
        self.category(category).map(|c| c.enabled).unwrap_or(false)
    }
}
