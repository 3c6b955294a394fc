use std::fs;
use std::path::Path;

use rime_core::settings::{self, parse_settings_toml, Settings};

/// Load settings from `config` (or the embedded defaults), then apply a
/// `rime_dir` override.
pub fn load_settings(config: Option<&str>, rime_dir: Option<&str>) -> Settings {
    let settings = match config {
        Some(file) => {
            let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
            die!(parse_settings_toml(&content), "Error in {file}: {}")
        }
        None => die!(
            parse_settings_toml(settings::default_toml()),
            "Error in embedded settings: {}"
        ),
    };
    match rime_dir {
        Some(dir) => settings.with_rime_dir(Path::new(dir)),
        None => settings,
    }
}

pub fn settings_export() {
    print!("{}", settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(parse_settings_toml(&content), "Error: {}");
    println!(
        "OK: rime_dir={}, {} tables, acronym.source={}",
        s.rime_dir.display(),
        s.tables.len(),
        s.acronym.source.display()
    );
}
