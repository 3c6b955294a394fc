use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Write one row per line, `\n`-terminated.
///
/// Atomic write: write to .tmp then rename. Parent directories are created.
pub fn write_lines<I, S>(path: &Path, lines: I) -> io::Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("tmp");
    {
        let mut out = BufWriter::new(fs::File::create(&tmp)?);
        for line in lines {
            out.write_all(line.as_ref().as_bytes())?;
            out.write_all(b"\n")?;
        }
        out.flush()?;
    }
    fs::rename(&tmp, path)
}
