use std::fs::File;
use std::io::{self, BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

use tracing::warn;

use super::MARKER;

/// Whether `line` is the marker line (trailing whitespace ignored).
pub fn is_marker(line: &str) -> bool {
    line.trim_end() == MARKER
}

/// A dictionary file opened for a single forward pass over its data rows.
pub struct LineSource {
    path: PathBuf,
    file: File,
}

impl LineSource {
    /// Open `path`. A missing or unreadable file is the fatal error of a run.
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = File::open(path).map_err(|e| {
            io::Error::new(e.kind(), format!("{}: {e}", path.display()))
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lazily yield `(line_no, line)` for each data line after the marker.
    pub fn data_lines(self) -> DataLines<BufReader<File>> {
        DataLines::new(BufReader::new(self.file)).with_label(self.path.display().to_string())
    }
}

/// Iterator over the data section of a dictionary.
///
/// Skips everything up to and including the marker line, then yields every
/// non-blank line that is not a `#` comment, paired with its 1-based line
/// number in the file. The file handle is released when the iterator is
/// dropped.
pub struct DataLines<R> {
    lines: Lines<R>,
    line_no: usize,
    seen_marker: bool,
    label: String,
}

impl<R: BufRead> DataLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
            seen_marker: false,
            label: String::from("<input>"),
        }
    }

    fn with_label(mut self, label: String) -> Self {
        self.label = label;
        self
    }
}

impl<R: BufRead> Iterator for DataLines<R> {
    type Item = io::Result<(usize, String)>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next() {
                Some(Ok(line)) => line,
                Some(Err(e)) => return Some(Err(e)),
                None => {
                    if !self.seen_marker {
                        warn!(source = %self.label, "marker line {MARKER:?} not found; no data rows");
                        self.seen_marker = true;
                    }
                    return None;
                }
            };
            self.line_no += 1;
            if !self.seen_marker {
                self.seen_marker = is_marker(&line);
                continue;
            }
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            return Some(Ok((self.line_no, line)));
        }
    }
}
