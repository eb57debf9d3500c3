//! Customer inquiry model and DTOs.

use ajfses_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `inquiries` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Inquiry {
    pub id: DbId,
    pub inquiry_date: Timestamp,
    pub name: String,
    pub mobile: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Public inquiry submission. Every field is required.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateInquiry {
    #[serde(default)]
    #[validate(length(min = 1, message = "is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "is required"))]
    pub mobile: String,
    #[serde(default)]
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "is required"))]
    pub subject: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "is required"))]
    pub message: String,
}

impl CreateInquiry {
    /// Trim surrounding whitespace from every field.
    pub fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            mobile: self.mobile.trim().to_string(),
            email: self.email.trim().to_string(),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
        }
    }
}

/// Partial inquiry update. Blank strings are treated as absent by the
/// handler before this reaches the repository.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateInquiry {
    pub name: Option<String>,
    pub mobile: Option<String>,
    #[validate(email(message = "must be a valid email address"))]
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
    pub status: Option<String>,
}
