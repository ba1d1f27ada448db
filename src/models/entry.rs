//! A single logged drink

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::category::CategoryId;

/// Unique identifier for a logged entry
pub type EntryId = Uuid;

/// One timestamped intake event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Unique entry identifier
    pub id: EntryId,
    /// Category this entry was logged against
    pub category: CategoryId,
    /// Consumed amount in the user's current units, never negative
    pub amount: f64,
    /// When the drink was consumed (local wall-clock time)
    pub at: NaiveDateTime,
}

impl Entry {
    pub fn new(category: CategoryId, amount: f64, at: NaiveDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            category,
            amount,
            at,
        }
    }
}
