//! Normalization, grouping, and acronym expansion for input-method
//! dictionaries.
//!
//! Dictionary rows are `text\tcode[\tweight]` lines after the `# +_+` marker.
//! [`normalize`] maps rows that differ only in case, spacing, or hyphenation
//! onto one key; [`index`] builds key sets and groups from a file's rows;
//! [`group`] picks the groups worth reviewing; [`acronym`] turns abbreviation
//! definitions into dictionary rows.

pub mod acronym;
pub mod dict;
pub mod extract;
pub mod group;
pub mod index;
pub mod normalize;
pub mod settings;
pub mod tables;
pub mod unicode;
