//! Client model, DTOs and metrics.

use ajfses_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `clients` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Client {
    pub id: DbId,
    pub name: String,
    pub area: String,
    pub service_name: Option<String>,
    pub service_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub note: Option<String>,
    pub image_link: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Dashboard figures over the whole `clients` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow, Serialize)]
pub struct ClientMetrics {
    /// Number of distinct client names.
    pub total_clients: i64,
    pub active_projects: i64,
    pub completed_projects: i64,
}

/// Fields for a new client, parsed from a multipart form.
#[derive(Debug, Clone)]
pub struct CreateClient {
    pub name: String,
    pub area: String,
    pub service_name: Option<String>,
    pub service_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub note: Option<String>,
}

/// Partial client update. `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct UpdateClient {
    pub name: Option<String>,
    pub area: Option<String>,
    pub service_name: Option<String>,
    pub service_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub note: Option<String>,
}
