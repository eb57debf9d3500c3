//! Inquiry status vocabulary.

use crate::error::CoreError;

pub const STATUS_NEW: &str = "NEW";
pub const STATUS_RESOLVED: &str = "RESOLVED";

/// Every status an inquiry may hold, in display order. Status counts are
/// reported for each of these even when zero.
pub const KNOWN_STATUSES: &[&str] = &[STATUS_NEW, STATUS_RESOLVED];

/// Normalize a client-supplied status to its canonical upper-case form.
pub fn validate_status(status: &str) -> Result<String, CoreError> {
    let upper = status.trim().to_uppercase();
    if KNOWN_STATUSES.contains(&upper.as_str()) {
        Ok(upper)
    } else {
        Err(CoreError::Validation(format!(
            "Invalid inquiry status '{status}'. Must be one of: {}",
            KNOWN_STATUSES.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_known_statuses_case_insensitively() {
        assert_eq!(validate_status("new").unwrap(), "NEW");
        assert_eq!(validate_status(" Resolved ").unwrap(), "RESOLVED");
    }

    #[test]
    fn rejects_unknown_status() {
        assert!(matches!(
            validate_status("ARCHIVED"),
            Err(CoreError::Validation(_))
        ));
        assert!(validate_status("").is_err());
    }
}
