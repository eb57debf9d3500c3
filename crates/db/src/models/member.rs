//! Team member model, DTOs and list filter.

use ajfses_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A `members` row joined with its team's title.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Member {
    pub id: DbId,
    pub name: String,
    pub team_id: DbId,
    pub team_name: Option<String>,
    pub designation: Option<String>,
    pub contact: Option<String>,
    pub note: Option<String>,
    pub image_link: Option<String>,
    pub show_on_homepage: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Fields for a new member, parsed from a multipart form.
#[derive(Debug, Clone)]
pub struct CreateMember {
    pub name: String,
    pub team_id: DbId,
    pub designation: Option<String>,
    pub contact: Option<String>,
    pub note: Option<String>,
    pub show_on_homepage: bool,
}

/// Partial member update. `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct UpdateMember {
    pub name: Option<String>,
    pub team_id: Option<DbId>,
    pub designation: Option<String>,
    pub contact: Option<String>,
    pub note: Option<String>,
    pub show_on_homepage: Option<bool>,
}

/// Filters for listing members. Empty/`None` fields do not filter.
#[derive(Debug, Clone, Default)]
pub struct MemberFilter {
    pub team_id: Option<DbId>,
    pub show_on_homepage_only: bool,
    /// Upper-cased designations; matched case-insensitively.
    pub designations: Vec<String>,
    pub limit: Option<i64>,
}
