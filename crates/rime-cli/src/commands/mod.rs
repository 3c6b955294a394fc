//! One module per subcommand family. Every command exits the process with a
//! message on a fatal error.

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            std::process::exit(1);
        })
    };
}

pub mod acronym_ops;
pub mod config_ops;
pub mod dict_ops;
pub mod extract_ops;

use std::path::Path;

use rime_core::dict::write_lines;

/// Write rows to `output`, or to stdout when no file is given.
pub(crate) fn emit(rows: &[String], output: Option<&str>) {
    match output {
        Some(path) => {
            die!(
                write_lines(Path::new(path), rows),
                "Error writing {path}: {}"
            );
            eprintln!("Wrote {} rows to {path}", rows.len());
        }
        None => {
            for row in rows {
                println!("{row}");
            }
        }
    }
}
