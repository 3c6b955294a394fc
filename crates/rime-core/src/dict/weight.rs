use std::fs;
use std::io;
use std::path::Path;

use tracing::{info, info_span};

use super::is_marker;

/// Set the weight of every data row in `content` to `weight`.
///
/// After the marker line, a trailing integer field is replaced; any other
/// data row (non-blank, not a `#` comment) gets `\t<weight>` appended.
/// Everything else, including line order and the final newline, is left as is.
pub fn rewrite_weights(content: &str, weight: i64) -> String {
    let mut seen_marker = false;
    let lines: Vec<String> = content
        .split('\n')
        .map(|raw| {
            let (line, cr) = match raw.strip_suffix('\r') {
                Some(line) => (line, "\r"),
                None => (raw, ""),
            };
            if !seen_marker {
                seen_marker = is_marker(line);
                return raw.to_string();
            }
            if line.trim().is_empty() || line.starts_with('#') {
                return raw.to_string();
            }
            let head = match line.rsplit_once('\t') {
                Some((head, last)) if last.trim().parse::<i64>().is_ok() => head,
                _ => line,
            };
            format!("{head}\t{weight}{cr}")
        })
        .collect();
    lines.join("\n")
}

/// Rewrite the weights of the dictionary at `path` in place.
pub fn rewrite_weights_file(path: &Path, weight: i64) -> io::Result<()> {
    let _span = info_span!("rewrite_weights", path = %path.display(), weight).entered();
    let start = std::time::Instant::now();

    let content = fs::read_to_string(path)?;
    let rewritten = rewrite_weights(&content, weight);
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, rewritten)?;
    fs::rename(&tmp, path)?;

    info!(elapsed_ms = start.elapsed().as_millis() as u64, "weights rewritten");
    Ok(())
}
