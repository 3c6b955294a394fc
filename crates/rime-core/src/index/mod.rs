//! Build key sets and key → variant groups from dictionary data rows.
//!
//! Input is the lazy data-line stream of a [`LineSource`](crate::dict::LineSource)
//! (or any iterator of `io::Result<(line_no, line)>`), already positioned
//! after the marker line. Line numbers are only used in diagnostics. Each
//! public operation consumes the stream once.

mod partition;

pub use partition::CapitalPartition;

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::io;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::dict::{DictError, DictionaryRow, Variant};
use crate::normalize::{EntryRule, FilterRule};
use crate::unicode::{contains_capital, is_lowercase_text};

/// Normalization key → distinct original variants behind it.
pub type Groups = BTreeMap<String, BTreeSet<Variant>>;

/// What to do with a data row that has no code field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MalformedPolicy {
    /// Abort the pass with [`DictError::MalformedRow`].
    #[default]
    Fail,
    /// Log a warning and continue with the next row.
    Skip,
}

/// Indexes one dictionary under a fixed [`EntryRule`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Indexer {
    rule: EntryRule,
    malformed: MalformedPolicy,
}

impl Indexer {
    pub fn new(rule: EntryRule) -> Self {
        Self {
            rule,
            malformed: MalformedPolicy::default(),
        }
    }

    pub fn with_malformed(mut self, policy: MalformedPolicy) -> Self {
        self.malformed = policy;
        self
    }

    /// Set of normalization keys.
    ///
    /// Under [`FilterRule::CapitalSplit`] this is the set of keys seen only on
    /// lines without any uppercase letter (see [`CapitalPartition::safe_keys`]).
    pub fn build_set<I>(&self, lines: I) -> Result<HashSet<String>, DictError>
    where
        I: IntoIterator<Item = io::Result<(usize, String)>>,
    {
        if self.rule.filter == FilterRule::CapitalSplit {
            return Ok(self.partition(lines)?.safe_keys());
        }
        let mut set = HashSet::new();
        self.scan(lines, |_, row| {
            set.insert(self.rule.key(&row.text, &row.code));
        })?;
        debug!(keys = set.len(), "built key set");
        Ok(set)
    }

    /// Group every row under its key, keeping the original `(text, code)`.
    pub fn build_map<I>(&self, lines: I) -> Result<Groups, DictError>
    where
        I: IntoIterator<Item = io::Result<(usize, String)>>,
    {
        let mut groups = Groups::new();
        self.scan(lines, |_, row| {
            let key = self.rule.key(&row.text, &row.code);
            groups.entry(key).or_default().insert(row.variant());
        })?;
        debug!(groups = groups.len(), "built key groups");
        Ok(groups)
    }

    /// Keys that only ever appear on uncapitalized lines, each mapped to the
    /// last such row in file order.
    pub fn build_safe_map<I>(&self, lines: I) -> Result<BTreeMap<String, Variant>, DictError>
    where
        I: IntoIterator<Item = io::Result<(usize, String)>>,
    {
        Ok(self.partition(lines)?.into_safe_map())
    }

    /// Split rows by whether their raw line carries an uppercase letter.
    pub fn partition<I>(&self, lines: I) -> Result<CapitalPartition, DictError>
    where
        I: IntoIterator<Item = io::Result<(usize, String)>>,
    {
        let mut partition = CapitalPartition::default();
        self.scan(lines, |line, row| {
            let key = self.rule.key(&row.text, &row.code);
            if contains_capital(line) {
                partition.insert_capital(key);
            } else {
                partition.insert_lower(key, row.variant());
            }
        })?;
        debug!(
            lower_rows = partition.lower_rows(),
            capital_rows = partition.capital_rows(),
            "partitioned by capitalization"
        );
        Ok(partition)
    }

    /// Feed every accepted row to `f` together with its raw line.
    fn scan<I, F>(&self, lines: I, mut f: F) -> Result<(), DictError>
    where
        I: IntoIterator<Item = io::Result<(usize, String)>>,
        F: FnMut(&str, DictionaryRow),
    {
        let mut dropped = 0usize;
        for line in lines {
            let (line_no, line) = line?;
            if self.rule.filter == FilterRule::LowercaseOnly && !is_lowercase_text(&line) {
                dropped += 1;
                continue;
            }
            let row = match DictionaryRow::parse(&line) {
                Ok(row) => row,
                Err(e) => match self.malformed {
                    MalformedPolicy::Fail => return Err(DictError::MalformedRow { line_no, line }),
                    MalformedPolicy::Skip => {
                        warn!(line_no, line = %line, "skipping malformed row: {e}");
                        continue;
                    }
                },
            };
            f(&line, row);
        }
        if dropped > 0 {
            debug!(dropped, "dropped capitalized rows");
        }
        Ok(())
    }
}

/// Set of normalization keys under `rule`, failing on malformed rows.
pub fn build_set<I>(lines: I, rule: EntryRule) -> Result<HashSet<String>, DictError>
where
    I: IntoIterator<Item = io::Result<(usize, String)>>,
{
    Indexer::new(rule).build_set(lines)
}

/// Key → variant groups under `rule`, failing on malformed rows.
pub fn build_map<I>(lines: I, rule: EntryRule) -> Result<Groups, DictError>
where
    I: IntoIterator<Item = io::Result<(usize, String)>>,
{
    Indexer::new(rule).build_map(lines)
}

/// Set of raw first-column texts. No normalization is applied; used for
/// dictionaries whose text needs no case folding.
pub fn build_plain_set<I>(lines: I) -> Result<HashSet<String>, DictError>
where
    I: IntoIterator<Item = io::Result<(usize, String)>>,
{
    let mut set = HashSet::new();
    for line in lines {
        let (_, line) = line?;
        let text = line.split('\t').next().unwrap_or_default();
        set.insert(text.to_string());
    }
    Ok(set)
}
