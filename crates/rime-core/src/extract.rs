//! Pull headwords out of a JSON dictionary dump.
//!
//! The dump is a stream of JSON objects whose keys are `|`-separated
//! headwords. Lines starting with `##` are comments.

use std::fs;
use std::path::Path;

use serde_json::{Deserializer, Map, Value};
use tracing::{info, info_span};

use crate::dict::write_lines;

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Headwords of every object in `input`, in stream order (keys in sorted
/// order within an object). Keys starting with `#` are skipped.
pub fn extract_words(input: &str) -> Result<Vec<String>, ExtractError> {
    let body: String = input
        .lines()
        .filter(|line| !line.starts_with("##") && !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    let mut words = Vec::new();
    for object in Deserializer::from_str(&body).into_iter::<Map<String, Value>>() {
        for key in object?.keys() {
            if key.starts_with('#') {
                continue;
            }
            words.extend(
                key.split('|')
                    .map(str::trim)
                    .filter(|w| !w.is_empty())
                    .map(str::to_string),
            );
        }
    }
    Ok(words)
}

/// Extract headwords from the dump at `input` and write them one per line to
/// `output`. Returns the number of words written.
pub fn extract_words_file(input: &Path, output: &Path) -> Result<usize, ExtractError> {
    let _span = info_span!("extract_words", input = %input.display()).entered();
    let start = std::time::Instant::now();

    let content = fs::read_to_string(input)?;
    let words = extract_words(&content)?;
    write_lines(output, &words)?;

    info!(
        words = words.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "words extracted"
    );
    Ok(words.len())
}
