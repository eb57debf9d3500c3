//! Client project statuses and service date parsing.

use chrono::NaiveDate;

use crate::error::CoreError;

/// Project currently in progress. Counted as an active project in metrics.
pub const STATUS_ACTIVE: &str = "Active";

/// Finished project. Counted as a completed project in metrics.
pub const STATUS_COMPLETED: &str = "Completed";

/// Parse a `YYYY-MM-DD` service date.
pub fn parse_service_date(value: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        CoreError::Validation(format!(
            "Invalid service_date '{value}'. Expected YYYY-MM-DD"
        ))
    })
}
