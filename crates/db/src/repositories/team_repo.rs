//! Repository for the `teams` table.

use std::collections::HashMap;

use ajfses_core::types::DbId;
use sqlx::PgPool;

use crate::models::member::Member;
use crate::models::team::{CreateTeam, Team, TeamWithMembers, UpdateTeam};
use crate::repositories::member_repo::member_select;

const COLUMNS: &str = "id, title, created_at, updated_at";

/// Provides CRUD operations for teams.
pub struct TeamRepo;

impl TeamRepo {
    /// Insert a new team. A duplicate title violates `uq_teams_title`.
    pub async fn create(pool: &PgPool, input: &CreateTeam) -> Result<Team, sqlx::Error> {
        let query = format!("INSERT INTO teams (title) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Team>(&query)
            .bind(&input.title)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Team>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM teams WHERE id = $1");
        sqlx::query_as::<_, Team>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all teams, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Team>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM teams ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Team>(&query).fetch_all(pool).await
    }

    /// Update a team. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTeam,
    ) -> Result<Option<Team>, sqlx::Error> {
        let query = format!(
            "UPDATE teams SET title = COALESCE($2, title)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Team>(&query)
            .bind(id)
            .bind(&input.title)
            .fetch_optional(pool)
            .await
    }

    /// Delete a team. Returns `true` if a row was removed.
    ///
    /// Fails with a foreign-key violation while members still reference it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM teams WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Every team with its members, including teams that have none.
    ///
    /// Teams are ordered like [`TeamRepo::list`]; members within a team are
    /// newest first.
    pub async fn list_with_members(pool: &PgPool) -> Result<Vec<TeamWithMembers>, sqlx::Error> {
        let teams = Self::list(pool).await?;

        let query = format!("{} ORDER BY m.created_at DESC, m.id DESC", member_select());
        let members = sqlx::query_as::<_, Member>(&query).fetch_all(pool).await?;

        let mut by_team: HashMap<DbId, Vec<Member>> = HashMap::new();
        for member in members {
            by_team.entry(member.team_id).or_default().push(member);
        }

        Ok(teams
            .into_iter()
            .map(|team| TeamWithMembers {
                team_id: team.id,
                members: by_team.remove(&team.id).unwrap_or_default(),
                team_name: team.title,
            })
            .collect())
    }

    /// Whether a team with this id exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM teams WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(exists)
    }
}
