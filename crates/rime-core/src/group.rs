//! Select the key groups worth reviewing.

use std::collections::BTreeSet;
use std::str::FromStr;

use serde::Deserialize;

use crate::dict::Variant;
use crate::index::Groups;
use crate::unicode::starts_with_capital;

/// Which groups [`filter`] retains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GroupPolicy {
    /// Two or more distinct variants share the key.
    Ambiguous,
    /// Some variant's text begins with an uppercase letter.
    HasCapitalStart,
    /// Either of the above; used for conflict-review tables.
    #[default]
    AmbiguousOrCapital,
}

impl GroupPolicy {
    pub fn retains(self, variants: &BTreeSet<Variant>) -> bool {
        let ambiguous = || variants.len() >= 2;
        let capital = || variants.iter().any(|v| starts_with_capital(&v.text));
        match self {
            GroupPolicy::Ambiguous => ambiguous(),
            GroupPolicy::HasCapitalStart => capital(),
            GroupPolicy::AmbiguousOrCapital => ambiguous() || capital(),
        }
    }
}

impl FromStr for GroupPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ambiguous" => Ok(GroupPolicy::Ambiguous),
            "has-capital-start" => Ok(GroupPolicy::HasCapitalStart),
            "ambiguous-or-capital" => Ok(GroupPolicy::AmbiguousOrCapital),
            _ => Err(format!(
                "unknown group policy '{s}' (available: ambiguous, has-capital-start, ambiguous-or-capital)"
            )),
        }
    }
}

/// Copy out the groups satisfying `policy`. The input is left untouched.
pub fn filter(groups: &Groups, policy: GroupPolicy) -> Groups {
    groups
        .iter()
        .filter(|(_, variants)| policy.retains(variants))
        .map(|(key, variants)| (key.clone(), variants.clone()))
        .collect()
}
