//! Query and extracted-text normalization.

use std::sync::LazyLock;

use regex::Regex;

/// Collapse ASCII whitespace runs to a single space and trim both ends.
///
/// Chat markdown breaks on embedded newlines, so every piece of text lifted
/// out of a manual page goes through here. Non-breaking spaces from `&nbsp;`
/// are content and survive untouched.
pub fn normalize_text(text: &str) -> String {
    static WS_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?-u:\s)+").expect("valid regex"));

    WS_RE
        .replace_all(text, " ")
        .trim_matches(|c: char| c.is_ascii_whitespace())
        .to_string()
}

/// Lowercase the command parameters and join them with single spaces.
pub fn normalize_query<S: AsRef<str>>(tokens: &[S]) -> String {
    tokens
        .iter()
        .map(|t| t.as_ref().to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}
