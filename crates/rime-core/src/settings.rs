//! Tool settings loaded from TOML.
//!
//! Settings are an explicit value: parse them once with
//! [`parse_settings_toml`] (or start from [`default_toml`]) and pass them to
//! whatever needs paths or table rules.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::group::GroupPolicy;
use crate::index::MalformedPolicy;
use crate::normalize::{CutoffRule, EntryRule, FilterRule};

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub rime_dir: PathBuf,
    #[serde(default)]
    pub tables: BTreeMap<String, TableSettings>,
    pub acronym: AcronymSettings,
    pub extract: ExtractSettings,
}

impl Settings {
    /// Join a relative path onto `rime_dir`; absolute paths pass through.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.rime_dir.join(path)
        }
    }

    pub fn with_rime_dir(mut self, rime_dir: impl Into<PathBuf>) -> Self {
        self.rime_dir = rime_dir.into();
        self
    }
}

/// How a table file is indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TableKind {
    /// Raw first-column texts.
    Plain,
    /// Normalization keys.
    Set,
    /// Key → variant groups, filtered by a [`GroupPolicy`].
    Groups,
    /// Key → variant for keys never seen capitalized.
    SafeMap,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TableSettings {
    pub path: PathBuf,
    pub kind: TableKind,
    #[serde(default)]
    pub filter: FilterRule,
    #[serde(default)]
    pub cutoff: CutoffRule,
    pub policy: Option<GroupPolicy>,
    #[serde(default)]
    pub malformed: MalformedPolicy,
}

impl TableSettings {
    pub fn rule(&self) -> EntryRule {
        EntryRule::new(self.filter, self.cutoff)
    }

    /// The lookup key for `(text, code)` in this table. Plain tables key on
    /// the raw text.
    pub fn key(&self, text: &str, code: &str) -> String {
        match self.kind {
            TableKind::Plain => text.to_string(),
            _ => self.rule().key(text, code),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AcronymSettings {
    pub source: PathBuf,
    pub output: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExtractSettings {
    pub input: PathBuf,
    pub output: PathBuf,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    fn invalid(field: String, reason: &str) -> SettingsError {
        SettingsError::InvalidValue {
            field,
            reason: reason.to_string(),
        }
    }

    macro_rules! check_path {
        ($value:expr, $field:expr) => {
            if $value.as_os_str().is_empty() {
                return Err(invalid($field, "must not be empty"));
            }
        };
    }

    check_path!(s.rime_dir, "rime_dir".to_string());
    check_path!(s.acronym.source, "acronym.source".to_string());
    check_path!(s.acronym.output, "acronym.output".to_string());
    check_path!(s.extract.input, "extract.input".to_string());
    check_path!(s.extract.output, "extract.output".to_string());

    for (name, table) in &s.tables {
        check_path!(table.path, format!("tables.{name}.path"));
        if table.policy.is_some() && table.kind != TableKind::Groups {
            return Err(invalid(
                format!("tables.{name}.policy"),
                "only groups tables take a policy",
            ));
        }
        if table.kind == TableKind::Plain
            && (table.filter != FilterRule::None || table.cutoff != CutoffRule::None)
        {
            return Err(invalid(
                format!("tables.{name}.kind"),
                "plain tables are not normalized; drop filter/cutoff",
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
rime_dir = "/opt/rime"

[acronym]
source = "others/en_acronym.txt"
output = "en_dicts/en_acronym.txt"

[extract]
input = "out.json"
output = "words.txt"
"#;

    #[test]
    fn parse_default_toml() {
        let s = parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap();
        assert_eq!(s.rime_dir, PathBuf::from("."));
        assert_eq!(s.tables.len(), 9);

        let en = &s.tables["en"];
        assert_eq!(en.kind, TableKind::Set);
        assert_eq!(en.rule(), EntryRule::new(FilterRule::AllLower, CutoffRule::RemoveBoth));

        let en_ext = &s.tables["en_ext"];
        assert_eq!(en_ext.rule(), EntryRule::new(FilterRule::None, CutoffRule::RemoveBoth));

        let groups = &s.tables["ahd_groups"];
        assert_eq!(groups.kind, TableKind::Groups);
        assert_eq!(groups.filter, FilterRule::CapitalSplit);
        assert_eq!(groups.policy, Some(GroupPolicy::AmbiguousOrCapital));
        assert_eq!(groups.malformed, MalformedPolicy::Fail);

        assert_eq!(s.tables["hanzi"].kind, TableKind::Plain);
        assert_eq!(s.tables["ahd_safe"].kind, TableKind::SafeMap);
        assert_eq!(s.acronym.source, PathBuf::from("others/en_acronym.txt"));
    }

    #[test]
    fn resolve_relative_and_absolute() {
        let s = parse_settings_toml(MINIMAL).unwrap();
        assert!(s.tables.is_empty());
        assert_eq!(
            s.resolve(Path::new("en_dicts/en.dict.yaml")),
            PathBuf::from("/opt/rime/en_dicts/en.dict.yaml")
        );
        assert_eq!(s.resolve(Path::new("/tmp/x")), PathBuf::from("/tmp/x"));

        let s = s.with_rime_dir("/home/me/rime");
        assert_eq!(
            s.resolve(Path::new("a.txt")),
            PathBuf::from("/home/me/rime/a.txt")
        );
    }

    #[test]
    fn table_defaults() {
        let toml = format!(
            "{MINIMAL}\n[tables.words]\npath = \"words.dict.yaml\"\nkind = \"set\"\nmalformed = \"skip\"\n"
        );
        let s = parse_settings_toml(&toml).unwrap();
        let t = &s.tables["words"];
        assert_eq!(t.rule(), EntryRule::default());
        assert_eq!(t.policy, None);
        assert_eq!(t.malformed, MalformedPolicy::Skip);
    }

    #[test]
    fn error_policy_on_set_table() {
        let toml = format!(
            "{MINIMAL}\n[tables.en]\npath = \"en.dict.yaml\"\nkind = \"set\"\npolicy = \"ambiguous\"\n"
        );
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue { .. }));
        assert!(err.to_string().contains("tables.en.policy"));
    }

    #[test]
    fn error_normalized_plain_table() {
        let toml = format!(
            "{MINIMAL}\n[tables.base]\npath = \"base.dict.yaml\"\nkind = \"plain\"\nfilter = \"all-lower\"\n"
        );
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(err.to_string().contains("tables.base.kind"));
    }

    #[test]
    fn error_empty_path() {
        let toml = format!("{MINIMAL}\n[tables.en]\npath = \"\"\nkind = \"set\"\n");
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(err.to_string().contains("tables.en.path"));

        let err = parse_settings_toml(&MINIMAL.replace("/opt/rime", "")).unwrap_err();
        assert!(err.to_string().contains("rime_dir"));
    }

    #[test]
    fn error_unknown_rule() {
        let toml = format!(
            "{MINIMAL}\n[tables.en]\npath = \"en.dict.yaml\"\nkind = \"set\"\nfilter = \"title-case\"\n"
        );
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn error_invalid_toml() {
        let err = parse_settings_toml("not valid toml {{{").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn error_missing_section() {
        let err = parse_settings_toml("rime_dir = \".\"\n").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }
}
