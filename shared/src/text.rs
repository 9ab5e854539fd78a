//! Text normalization
//!
//! Folds a label into the form used as a dictionary key: lowercase,
//! combining diacritical marks removed (NFD + filter), surrounding
//! whitespace trimmed. `"  MIÉRCOLES "` becomes `"miercoles"`.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Normalize a label for use as a lookup key.
///
/// Total and idempotent: `normalize(&normalize(s)) == normalize(s)`.
pub fn normalize(input: &str) -> String {
    // Lowercasing can emit combining marks (`İ` -> `i\u{307}`), so it runs
    // before the decomposition pass.
    input
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Normalize an optional label; absent input yields an empty string.
pub fn normalize_opt(input: Option<&str>) -> String {
    input.map(normalize).unwrap_or_default()
}

/// Normalize and drop every whitespace character, including interior ones.
///
/// Covers concatenation artifacts such as `"Mier coles"` coming out
/// of spreadsheet headers or data attributes.
pub fn compact(input: &str) -> String {
    normalize(input)
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}
