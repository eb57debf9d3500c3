//! Domain error type shared by every layer.

use crate::types::DbId;

/// Errors raised by domain rules, independent of transport.
///
/// The HTTP layer maps each variant onto a status code; see
/// `ajfses_api::error::AppError`.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for [`CoreError::NotFound`].
    pub fn not_found(entity: &'static str, id: DbId) -> Self {
        CoreError::NotFound { entity, id }
    }
}

/// Flatten `validator` field errors into one readable message.
///
/// Produces e.g. `"email: must be a valid email address; name: must not be empty"`.
/// Fields are sorted so the message is stable across runs.
impl From<validator::ValidationErrors> for CoreError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut parts: Vec<String> = errors
            .field_errors()
            .iter()
            .map(|(field, errs)| {
                let reasons: Vec<String> = errs
                    .iter()
                    .map(|e| match &e.message {
                        Some(msg) => msg.to_string(),
                        None => e.code.to_string(),
                    })
                    .collect();
                format!("{field}: {}", reasons.join(", "))
            })
            .collect();
        parts.sort();
        CoreError::Validation(parts.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use validator::Validate;

    use super::*;

    #[derive(Validate)]
    struct Contact {
        #[validate(email(message = "must be a valid email address"))]
        email: String,
        #[validate(length(min = 1))]
        name: String,
    }

    #[test]
    fn validation_errors_are_flattened_and_sorted() {
        let contact = Contact {
            email: "nope".into(),
            name: String::new(),
        };
        let err: CoreError = contact.validate().unwrap_err().into();
        match err {
            CoreError::Validation(msg) => {
                assert_eq!(msg, "email: must be a valid email address; name: length");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
