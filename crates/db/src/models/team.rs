//! Team model and DTOs.

use ajfses_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::member::Member;

/// A row from the `teams` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Team {
    pub id: DbId,
    pub title: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A team together with every member assigned to it.
#[derive(Debug, Clone, Serialize)]
pub struct TeamWithMembers {
    pub team_id: DbId,
    pub team_name: String,
    pub members: Vec<Member>,
}

/// DTO for creating a team.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTeam {
    #[serde(default)]
    pub title: String,
}

/// DTO for renaming a team.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTeam {
    pub title: Option<String>,
}
