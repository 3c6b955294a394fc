use std::collections::{BTreeMap, HashMap, HashSet};

use crate::dict::Variant;

/// Keys accumulated from uncapitalized and capitalized lines.
///
/// A key is safe to treat as lowercase-canonical only if no line anywhere in
/// the same file produced it with capitalization.
#[derive(Debug, Default)]
pub struct CapitalPartition {
    lower: HashMap<String, Variant>,
    capital: HashSet<String>,
    lower_rows: usize,
    capital_rows: usize,
}

impl CapitalPartition {
    pub(crate) fn insert_lower(&mut self, key: String, variant: Variant) {
        self.lower_rows += 1;
        self.lower.insert(key, variant);
    }

    pub(crate) fn insert_capital(&mut self, key: String) {
        self.capital_rows += 1;
        self.capital.insert(key);
    }

    /// Rows routed to the uncapitalized accumulator.
    pub fn lower_rows(&self) -> usize {
        self.lower_rows
    }

    /// Rows routed to the capitalized accumulator.
    pub fn capital_rows(&self) -> usize {
        self.capital_rows
    }

    pub fn capital_keys(&self) -> impl Iterator<Item = &str> {
        self.capital.iter().map(String::as_str)
    }

    pub fn is_safe(&self, key: &str) -> bool {
        self.lower.contains_key(key) && !self.capital.contains(key)
    }

    /// Lowercase keys minus capitalized keys.
    pub fn safe_keys(&self) -> HashSet<String> {
        self.lower
            .keys()
            .filter(|k| !self.capital.contains(*k))
            .cloned()
            .collect()
    }

    pub fn into_safe_map(self) -> BTreeMap<String, Variant> {
        let capital = self.capital;
        self.lower
            .into_iter()
            .filter(|(k, _)| !capital.contains(k))
            .collect()
    }
}
