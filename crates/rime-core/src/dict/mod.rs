//! Tab-delimited dictionary files: rows, the marker-gated line source, and
//! the writers that put results back on disk.
//!
//! A dictionary file is a YAML-ish header followed by the marker line
//! [`MARKER`]; every line after the marker is a `text\tcode[\tweight]` row.

mod row;
mod source;
#[cfg(test)]
mod tests;
mod weight;
mod writer;

pub use row::{DictionaryRow, Entry, RowError, Variant};
pub use source::{is_marker, DataLines, LineSource};
pub use weight::{rewrite_weights, rewrite_weights_file};
pub use writer::write_lines;

use std::io;

/// Sentinel line separating the header from data rows.
pub const MARKER: &str = "# +_+";

/// Errors raised while reading or indexing dictionary files.
#[derive(Debug, thiserror::Error)]
pub enum DictError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// `line_no` is the 1-based line number in the source file.
    #[error("malformed data row at line {line_no}: {line:?}")]
    MalformedRow { line_no: usize, line: String },
}
