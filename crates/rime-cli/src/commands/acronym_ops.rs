use std::path::PathBuf;

use rime_core::acronym;
use rime_core::settings::Settings;

use super::emit;

/// Expand the acronym source into dictionary rows.
///
/// `input`/`output` default to the `[acronym]` settings. An output of `-`
/// prints to stdout. Each duplicate line is already logged by the expander;
/// only the count is reported here.
pub fn expand(settings: &Settings, input: Option<&str>, output: Option<&str>) {
    let input: PathBuf = match input {
        Some(p) => PathBuf::from(p),
        None => settings.resolve(&settings.acronym.source),
    };
    let output: Option<String> = match output {
        Some("-") => None,
        Some(p) => Some(p.to_string()),
        None => Some(
            settings
                .resolve(&settings.acronym.output)
                .display()
                .to_string(),
        ),
    };

    let (rows, duplicates) = die!(
        acronym::expand_file(&input),
        "Error reading {}: {}",
        input.display()
    );
    let rows: Vec<String> = rows.iter().map(|r| r.to_string()).collect();
    emit(&rows, output.as_deref());
    if !duplicates.is_empty() {
        eprintln!("({} duplicate lines skipped)", duplicates.len());
    }
}
