//! Expand abbreviation definitions into dictionary rows.
//!
//! Source lines are `ABBR\texpansion one\texpansion two...`. Each definition
//! yields a self-mapping row, then for every expansion the phrase itself and
//! its space-compacted form, all pointing back at the abbreviation.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use tracing::{info, info_span, warn};

use crate::normalize::compact;

/// One parsed abbreviation definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcronymEntry {
    pub abbreviation: String,
    /// In source order; empty fields are dropped.
    pub expansions: Vec<String>,
}

impl AcronymEntry {
    /// Parse a trimmed, non-comment source line. Returns `None` when the line
    /// has no expansion field.
    pub fn parse(line: &str) -> Option<Self> {
        let mut fields = line.split('\t');
        let abbreviation = fields.next()?.to_string();
        let expansions: Vec<String> = fields
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .collect();
        if abbreviation.is_empty() || expansions.is_empty() {
            return None;
        }
        Some(Self {
            abbreviation,
            expansions,
        })
    }

    /// The `1 + 2k` rows for this definition, in emission order.
    pub fn rows(&self) -> Vec<AcronymRow> {
        let abbr = &self.abbreviation;
        let mut rows = Vec::with_capacity(1 + 2 * self.expansions.len());
        rows.push(AcronymRow::new(abbr.clone(), abbr.clone()));
        for expansion in &self.expansions {
            rows.push(AcronymRow::new(expansion.clone(), abbr.clone()));
            rows.push(AcronymRow::new(compact(expansion), abbr.clone()));
        }
        rows
    }
}

/// `key\tvalue` output row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AcronymRow {
    pub key: String,
    pub value: String,
}

impl AcronymRow {
    fn new(key: String, value: String) -> Self {
        Self { key, value }
    }
}

impl fmt::Display for AcronymRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.key, self.value)
    }
}

/// Lazily expands source lines in a single forward pass.
///
/// Exact repeats of an earlier (trimmed) line are skipped and recorded as
/// duplicates; blank lines, `#` comments, and lines without expansions are
/// skipped silently.
pub struct AcronymExpander<I> {
    lines: I,
    seen: HashSet<String>,
    pending: std::vec::IntoIter<AcronymRow>,
    duplicates: Vec<String>,
}

impl<I, S> AcronymExpander<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    pub fn new(lines: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            lines: lines.into_iter(),
            seen: HashSet::new(),
            pending: Vec::new().into_iter(),
            duplicates: Vec::new(),
        }
    }

    /// Duplicate lines encountered so far, in input order.
    pub fn diagnostics(&self) -> &[String] {
        &self.duplicates
    }

    pub fn into_diagnostics(self) -> Vec<String> {
        self.duplicates
    }
}

impl<I, S> Iterator for AcronymExpander<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    type Item = AcronymRow;

    fn next(&mut self) -> Option<AcronymRow> {
        loop {
            if let Some(row) = self.pending.next() {
                return Some(row);
            }
            let raw = self.lines.next()?;
            let line = raw.as_ref().trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if !self.seen.insert(line.to_string()) {
                warn!(line, "duplicate acronym definition");
                self.duplicates.push(line.to_string());
                continue;
            }
            if let Some(entry) = AcronymEntry::parse(line) {
                self.pending = entry.rows().into_iter();
            }
        }
    }
}

/// Expand every definition in the acronym source file at `path`.
///
/// Returns the output rows and the duplicate lines that were skipped.
pub fn expand_file(path: &Path) -> io::Result<(Vec<AcronymRow>, Vec<String>)> {
    let _span = info_span!("expand_acronyms", path = %path.display()).entered();
    let start = std::time::Instant::now();

    let content = fs::read_to_string(path)?;
    let mut expander = AcronymExpander::new(content.lines());
    let rows: Vec<AcronymRow> = expander.by_ref().collect();
    let duplicates = expander.into_diagnostics();

    info!(
        rows = rows.len(),
        duplicates = duplicates.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "acronyms expanded"
    );
    Ok((rows, duplicates))
}
