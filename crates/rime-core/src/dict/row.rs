use std::fmt;

/// One parsed data row: `text\tcode[\t...][\tweight]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryRow {
    pub text: String,
    pub code: String,
    pub weight: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RowError {
    #[error("missing tab-separated code field")]
    MissingField,
    #[error("empty {0} field")]
    EmptyField(&'static str),
}

impl DictionaryRow {
    /// Parse a data line. `text` and `code` must be non-empty after trimming;
    /// a trailing integer field beyond the code is taken as the weight.
    pub fn parse(line: &str) -> Result<Self, RowError> {
        let fields: Vec<&str> = line.split('\t').collect();
        let [text, code, rest @ ..] = fields.as_slice() else {
            return Err(RowError::MissingField);
        };
        if text.trim().is_empty() {
            return Err(RowError::EmptyField("text"));
        }
        if code.trim().is_empty() {
            return Err(RowError::EmptyField("code"));
        }
        let weight = rest.last().and_then(|w| w.trim().parse().ok());
        Ok(Self {
            text: (*text).to_string(),
            code: (*code).to_string(),
            weight,
        })
    }

    pub fn variant(&self) -> Variant {
        Variant {
            text: self.text.clone(),
            code: self.code.clone(),
        }
    }
}

/// Original `(text, code)` pair that contributed to a normalization key.
///
/// Equality, hashing, and ordering cover both fields, so identical variants
/// collapse in sets and groups iterate deterministically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variant {
    pub text: String,
    pub code: String,
}

impl Variant {
    pub fn new(text: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            code: code.into(),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.text, self.code)
    }
}

/// A value held by a lookup table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Entry {
    /// A member of a key-set table: the raw first-column text of a plain
    /// table, or the normalization key of a set table.
    PlainKey(String),
    /// An original row behind a normalized key.
    TextCode(Variant),
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::PlainKey(key) => f.write_str(key),
            Entry::TextCode(variant) => variant.fmt(f),
        }
    }
}
