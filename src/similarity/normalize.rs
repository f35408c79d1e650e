//! Canonical form used before every comparison.

/// Trim leading/trailing whitespace and lowercase.
///
/// Uses `str::to_lowercase`, which applies the Unicode lowercase mapping
/// without any locale tailoring. No NFC/NFKC or diacritic folding is done.
/// Whitespace-only input yields an empty string.
#[must_use]
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}
