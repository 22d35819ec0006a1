//! Cross-row uniqueness tracking.

use std::collections::{HashMap, HashSet};

#[derive(Debug, Default, Clone)]
struct SeenValues {
    /// Every observed value in row order, empty ones included.
    values: Vec<String>,
    non_empty: HashSet<String>,
}

/// Values seen so far for each `unique` field, across all rows of a document.
#[derive(Debug, Default, Clone)]
pub struct UniquenessTracker {
    fields: HashMap<String, SeenValues>,
}

impl UniquenessTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a value for a field.
    ///
    /// Returns `true` when the value is non-empty and was already recorded for
    /// this field. Empty values are recorded but never count as duplicates.
    pub fn observe(&mut self, field: &str, value: &str) -> bool {
        let seen = self.fields.entry(field.to_string()).or_default();
        seen.values.push(value.to_string());
        if value.is_empty() {
            return false;
        }
        !seen.non_empty.insert(value.to_string())
    }

    /// Every value recorded for a field, in row order.
    pub fn values(&self, field: &str) -> &[String] {
        self.fields
            .get(field)
            .map(|seen| seen.values.as_slice())
            .unwrap_or_default()
    }
}
