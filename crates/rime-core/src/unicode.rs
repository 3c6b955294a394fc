//! Character-level case classification for dictionary lines.
//!
//! All checks use Unicode case properties (`char::is_uppercase`), so scripts
//! without case (CJK, digits, punctuation) never count as capitalized.

/// Check whether any character of `s` is uppercase.
pub fn contains_capital(s: &str) -> bool {
    s.chars().any(char::is_uppercase)
}

/// Check that no letter of `s` is uppercase.
///
/// Caseless text (including the empty string) counts as lowercase.
pub fn is_lowercase_text(s: &str) -> bool {
    !contains_capital(s)
}

/// Check whether the first character of `s` is uppercase.
pub fn starts_with_capital(s: &str) -> bool {
    s.chars().next().is_some_and(char::is_uppercase)
}

/// Lowercase only the leading character of each whitespace-separated word.
///
/// Words are rejoined with a single space, so runs of whitespace and
/// leading/trailing whitespace collapse: `"Windows  XP "` → `"windows XP"`.
pub fn lowercase_first_letters(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for word in s.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        let mut chars = word.chars();
        match chars.next() {
            Some(first) if first.is_uppercase() => {
                out.extend(first.to_lowercase());
                out.push_str(chars.as_str());
            }
            _ => out.push_str(word),
        }
    }
    out
}
