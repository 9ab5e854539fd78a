//! Input validation helpers
//!
//! Text length limits for everything a user types into the menu and
//! attendance screens. Lengths are counted in characters, not bytes, so
//! non-Latin names get the same room as Latin ones.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Menu item names, branch and department names
pub const MAX_NAME_LEN: usize = 200;

/// Item descriptions and attendance notes
pub const MAX_NOTE_LEN: usize = 500;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty"))
            .with_detail("field", field));
    }
    check_len(value, field, max_len)
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    match value {
        Some(v) => check_len(v, field, max_len),
        None => Ok(()),
    }
}

fn check_len(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    let len = value.chars().count();
    if len > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({len} chars, max {max_len})"
        ))
        .with_detail("field", field)
        .with_detail("max_len", max_len));
    }
    Ok(())
}
