//! Input normalization shared by form and JSON handlers.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Default page size for inquiry listings.
pub const DEFAULT_LIST_LIMIT: i64 = 50;

/// Hard cap on any page size.
pub const MAX_LIST_LIMIT: i64 = 500;

// ---------------------------------------------------------------------------
// Text fields
// ---------------------------------------------------------------------------

/// Trim a required text field. Missing or blank input is a validation error
/// naming the field.
pub fn require_text(field: &str, value: Option<&str>) -> Result<String, CoreError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(CoreError::Validation(format!("{field} is required"))),
    }
}

/// Trim an optional text field, treating blank input as absent.
pub fn normalize_optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// Clamp a requested limit to `[1, max]`, falling back to `default`.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).clamp(1, max)
}

/// Clamp an offset to be non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}
