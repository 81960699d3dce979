/// Lower-cases criteria text and collapses invisible characters and runs of whitespace.
pub(crate) fn normalize_text(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}', '\u{00a0}'], " ");
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.to_lowercase()
}

/// Splits normalized text into words. `-` and `+` stay inside a word so that
/// `medi-cal`, `3-21` and `22+` survive as single tokens.
pub(crate) fn tokenize(normalized: &str) -> Vec<&str> {
    normalized
        .split(|ch: char| !(ch.is_alphanumeric() || ch == '-' || ch == '+'))
        .map(|token| token.trim_matches('-'))
        .filter(|token| token.chars().any(char::is_alphanumeric))
        .collect()
}
