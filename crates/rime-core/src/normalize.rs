//! Normalization keys for English dictionary rows.
//!
//! A key is `cutoff(filter(text) + lowercase(code))`. Rows that differ only in
//! letter case, spacing, or hyphenation collapse onto the same key, which is
//! what duplicate detection across dictionaries groups on.

use std::str::FromStr;

use serde::Deserialize;

use crate::unicode::lowercase_first_letters;

/// Casing transform applied to the text column before keying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterRule {
    /// Text is keyed as-is.
    #[default]
    None,
    /// Rows whose raw line carries any uppercase letter are dropped before
    /// keying; surviving text is keyed as-is.
    LowercaseOnly,
    /// `"Windows XP"` → `"windows xP"`.
    FirstLetterLower,
    AllLower,
    /// Keyed like `AllLower`, but rows are also partitioned by whether the raw
    /// line carries any uppercase letter.
    CapitalSplit,
}

impl FilterRule {
    pub fn apply(self, text: &str) -> String {
        match self {
            FilterRule::None | FilterRule::LowercaseOnly => text.to_string(),
            FilterRule::FirstLetterLower => lowercase_first_letters(text),
            FilterRule::AllLower | FilterRule::CapitalSplit => text.to_lowercase(),
        }
    }
}

impl FromStr for FilterRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(FilterRule::None),
            "lowercase-only" => Ok(FilterRule::LowercaseOnly),
            "first-letter-lower" => Ok(FilterRule::FirstLetterLower),
            "all-lower" => Ok(FilterRule::AllLower),
            "capital-split" => Ok(FilterRule::CapitalSplit),
            _ => Err(format!(
                "unknown filter rule '{s}' (available: none, lowercase-only, \
                 first-letter-lower, all-lower, capital-split)"
            )),
        }
    }
}

/// Separator removal applied to the concatenated key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CutoffRule {
    #[default]
    None,
    RemoveSpaces,
    RemoveHyphens,
    RemoveBoth,
}

impl CutoffRule {
    fn removes(self, c: char) -> bool {
        match self {
            CutoffRule::None => false,
            CutoffRule::RemoveSpaces => c == ' ',
            CutoffRule::RemoveHyphens => c == '-',
            CutoffRule::RemoveBoth => c == ' ' || c == '-',
        }
    }

    pub fn apply(self, s: &str) -> String {
        if self == CutoffRule::None {
            return s.to_string();
        }
        s.chars().filter(|&c| !self.removes(c)).collect()
    }
}

impl FromStr for CutoffRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(CutoffRule::None),
            "remove-spaces" => Ok(CutoffRule::RemoveSpaces),
            "remove-hyphens" => Ok(CutoffRule::RemoveHyphens),
            "remove-both" => Ok(CutoffRule::RemoveBoth),
            _ => Err(format!(
                "unknown cutoff rule '{s}' (available: none, remove-spaces, remove-hyphens, remove-both)"
            )),
        }
    }
}

/// Filter and cutoff rule pair for one dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
pub struct EntryRule {
    #[serde(default)]
    pub filter: FilterRule,
    #[serde(default)]
    pub cutoff: CutoffRule,
}

impl EntryRule {
    pub const fn new(filter: FilterRule, cutoff: CutoffRule) -> Self {
        Self { filter, cutoff }
    }

    pub fn key(&self, text: &str, code: &str) -> String {
        key(text, code, self.filter, self.cutoff)
    }
}

/// Compute the normalization key of a `(text, code)` pair.
///
/// The filter touches `text` only; `code` is always lowercased. Never fails:
/// empty inputs give an empty key.
pub fn key(text: &str, code: &str, filter: FilterRule, cutoff: CutoffRule) -> String {
    let mut joined = filter.apply(text);
    joined.push_str(&code.to_lowercase());
    cutoff.apply(&joined)
}

/// Remove every space from a phrase: `"Space Administration"` →
/// `"SpaceAdministration"`.
pub fn compact(phrase: &str) -> String {
    CutoffRule::RemoveSpaces.apply(phrase)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    const FILTERS: [FilterRule; 5] = [
        FilterRule::None,
        FilterRule::LowercaseOnly,
        FilterRule::FirstLetterLower,
        FilterRule::AllLower,
        FilterRule::CapitalSplit,
    ];

    const CUTOFFS: [CutoffRule; 4] = [
        CutoffRule::None,
        CutoffRule::RemoveSpaces,
        CutoffRule::RemoveHyphens,
        CutoffRule::RemoveBoth,
    ];

    #[test]
    fn first_letter_lower_keeps_inner_capitals() {
        assert_eq!(FilterRule::FirstLetterLower.apply("Windows XP"), "windows xP");
        assert_eq!(
            key("Windows XP", "Windows XP", FilterRule::FirstLetterLower, CutoffRule::None),
            "windows xPwindows xp"
        );
    }

    #[test]
    fn code_is_always_lowercased() {
        assert_eq!(key("Apple", "APPL", FilterRule::None, CutoffRule::None), "Appleappl");
        assert_eq!(
            key("Apple", "APPL", FilterRule::LowercaseOnly, CutoffRule::None),
            "Appleappl"
        );
    }

    #[test]
    fn all_lower_and_capital_split_key_alike() {
        let a = key("Hello-World", "Hello World", FilterRule::AllLower, CutoffRule::None);
        let b = key("Hello-World", "Hello World", FilterRule::CapitalSplit, CutoffRule::None);
        assert_eq!(a, "hello-worldhello world");
        assert_eq!(a, b);
    }

    #[test]
    fn cutoff_variants() {
        let text = "e-mail box";
        assert_eq!(CutoffRule::None.apply(text), "e-mail box");
        assert_eq!(CutoffRule::RemoveSpaces.apply(text), "e-mailbox");
        assert_eq!(CutoffRule::RemoveHyphens.apply(text), "email box");
        assert_eq!(CutoffRule::RemoveBoth.apply(text), "emailbox");
    }

    #[test]
    fn cutoff_only_removes_ascii_space() {
        // Tabs and other whitespace survive; only ' ' is a separator.
        assert_eq!(CutoffRule::RemoveSpaces.apply("a\tb c"), "a\tbc");
    }

    #[test]
    fn apple_variants_collapse() {
        let rule = EntryRule::new(FilterRule::AllLower, CutoffRule::RemoveBoth);
        assert_eq!(rule.key("Apple", "APPL"), "appleappl");
        assert_eq!(rule.key("apple", "appl"), "appleappl");
    }

    #[test]
    fn empty_input_gives_empty_key() {
        for filter in FILTERS {
            for cutoff in CUTOFFS {
                assert_eq!(key("", "", filter, cutoff), "");
            }
        }
        assert_eq!(key(" - ", "-", FilterRule::None, CutoffRule::RemoveBoth), "");
    }

    #[test]
    fn compact_phrase() {
        assert_eq!(
            compact("National Aeronautics and Space Administration"),
            "NationalAeronauticsandSpaceAdministration"
        );
        assert_eq!(compact("single"), "single");
    }

    #[test]
    fn rules_deserialize_kebab_case() {
        let rule: EntryRule =
            toml::from_str("filter = \"first-letter-lower\"\ncutoff = \"remove-hyphens\"").unwrap();
        assert_eq!(rule.filter, FilterRule::FirstLetterLower);
        assert_eq!(rule.cutoff, CutoffRule::RemoveHyphens);

        let rule: EntryRule = toml::from_str("").unwrap();
        assert_eq!(rule, EntryRule::default());
    }

    #[test]
    fn rules_from_str() {
        assert_eq!("capital-split".parse::<FilterRule>(), Ok(FilterRule::CapitalSplit));
        assert_eq!("remove-hyphens".parse::<CutoffRule>(), Ok(CutoffRule::RemoveHyphens));
        assert!("AllLower".parse::<FilterRule>().is_err());
        assert!("spaces".parse::<CutoffRule>().unwrap_err().contains("remove-spaces"));
    }

    fn arb_filter() -> impl Strategy<Value = FilterRule> {
        prop::sample::select(FILTERS.to_vec())
    }

    fn arb_cutoff() -> impl Strategy<Value = CutoffRule> {
        prop::sample::select(CUTOFFS.to_vec())
    }

    proptest! {
        #[test]
        fn key_is_deterministic(
            text in "[ a-zA-Z\\-]{0,16}",
            code in "[ a-zA-Z\\-]{0,16}",
            filter in arb_filter(),
            cutoff in arb_cutoff(),
        ) {
            prop_assert_eq!(key(&text, &code, filter, cutoff), key(&text, &code, filter, cutoff));
        }

        #[test]
        fn remove_both_strips_all_separators(
            text in "\\PC{0,24}",
            code in "\\PC{0,24}",
            filter in arb_filter(),
        ) {
            let k = key(&text, &code, filter, CutoffRule::RemoveBoth);
            prop_assert!(!k.contains(' '));
            prop_assert!(!k.contains('-'));
        }

        #[test]
        fn all_lower_is_case_insensitive(text in "[ a-zA-Z]{0,16}", code in "[a-zA-Z]{0,8}") {
            prop_assert_eq!(
                key(&text, &code, FilterRule::AllLower, CutoffRule::RemoveBoth),
                key(&text.to_uppercase(), &code.to_uppercase(), FilterRule::AllLower, CutoffRule::RemoveBoth)
            );
        }
    }
}
