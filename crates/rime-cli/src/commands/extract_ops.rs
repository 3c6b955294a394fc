use std::path::PathBuf;

use rime_core::extract;
use rime_core::settings::Settings;

/// Extract headwords from a JSON dump. Paths default to `[extract]`.
pub fn extract_words(settings: &Settings, input: Option<&str>, output: Option<&str>) {
    let input = input
        .map(PathBuf::from)
        .unwrap_or_else(|| settings.resolve(&settings.extract.input));
    let output = output
        .map(PathBuf::from)
        .unwrap_or_else(|| settings.resolve(&settings.extract.output));

    eprintln!("Reading {}...", input.display());
    let count = die!(
        extract::extract_words_file(&input, &output),
        "Error extracting words: {}"
    );
    eprintln!("Wrote {count} words to {}", output.display());
}
