//! Repository for the `members` table.
//!
//! Every read joins `teams` so rows carry `team_name`. Writes use a
//! data-modifying CTE and select through the same join.

use ajfses_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::member::{CreateMember, Member, MemberFilter, UpdateMember};

/// Member columns plus the joined team title, aliased as `m` / `t`.
const COLUMNS: &str = "m.id, m.name, m.team_id, t.title AS team_name, m.designation, \
                       m.contact, m.note, m.image_link, m.show_on_homepage, \
                       m.created_at, m.updated_at";

/// `SELECT ... FROM members m LEFT JOIN teams t` with no trailing clauses.
pub(crate) fn member_select() -> String {
    format!("SELECT {COLUMNS} FROM members m LEFT JOIN teams t ON t.id = m.team_id")
}

/// Provides CRUD operations for team members.
pub struct MemberRepo;

impl MemberRepo {
    /// Insert a member inside `tx` with no image link yet.
    pub async fn create_tx(
        tx: &mut Transaction<'_, Postgres>,
        input: &CreateMember,
    ) -> Result<Member, sqlx::Error> {
        let query = format!(
            "WITH m AS (
                INSERT INTO members (name, team_id, designation, contact, note, show_on_homepage)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING *
             )
             SELECT {COLUMNS} FROM m LEFT JOIN teams t ON t.id = m.team_id"
        );
        sqlx::query_as::<_, Member>(&query)
            .bind(&input.name)
            .bind(input.team_id)
            .bind(&input.designation)
            .bind(&input.contact)
            .bind(&input.note)
            .bind(input.show_on_homepage)
            .fetch_one(&mut **tx)
            .await
    }

    /// Point a member created in `tx` at its stored image file.
    pub async fn set_image_link_tx(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
        image_link: &str,
    ) -> Result<Member, sqlx::Error> {
        let query = format!(
            "WITH m AS (
                UPDATE members SET image_link = $2 WHERE id = $1 RETURNING *
             )
             SELECT {COLUMNS} FROM m LEFT JOIN teams t ON t.id = m.team_id"
        );
        sqlx::query_as::<_, Member>(&query)
            .bind(id)
            .bind(image_link)
            .fetch_one(&mut **tx)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Member>, sqlx::Error> {
        let query = format!("{} WHERE m.id = $1", member_select());
        sqlx::query_as::<_, Member>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List members matching `filter`, newest first.
    ///
    /// When designations are given, results follow the order of that list
    /// (so leadership comes back chairman first).
    pub async fn list(pool: &PgPool, filter: &MemberFilter) -> Result<Vec<Member>, sqlx::Error> {
        let query = format!(
            "{}
             WHERE ($1::BIGINT IS NULL OR m.team_id = $1)
               AND (NOT $2 OR m.show_on_homepage)
               AND (cardinality($3::TEXT[]) = 0 OR UPPER(m.designation) = ANY($3))
             ORDER BY array_position($3::TEXT[], UPPER(m.designation)) NULLS LAST,
                      m.created_at DESC, m.id DESC
             LIMIT $4",
            member_select()
        );
        sqlx::query_as::<_, Member>(&query)
            .bind(filter.team_id)
            .bind(filter.show_on_homepage_only)
            .bind(&filter.designations)
            .bind(filter.limit)
            .fetch_all(pool)
            .await
    }

    /// Update a member. Only non-`None` fields (and `image_link`, when
    /// given) are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMember,
        image_link: Option<&str>,
    ) -> Result<Option<Member>, sqlx::Error> {
        let query = format!(
            "WITH m AS (
                UPDATE members SET
                    name = COALESCE($2, name),
                    team_id = COALESCE($3, team_id),
                    designation = COALESCE($4, designation),
                    contact = COALESCE($5, contact),
                    note = COALESCE($6, note),
                    show_on_homepage = COALESCE($7, show_on_homepage),
                    image_link = COALESCE($8, image_link)
                WHERE id = $1
                RETURNING *
             )
             SELECT {COLUMNS} FROM m LEFT JOIN teams t ON t.id = m.team_id"
        );
        sqlx::query_as::<_, Member>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.team_id)
            .bind(&input.designation)
            .bind(&input.contact)
            .bind(&input.note)
            .bind(input.show_on_homepage)
            .bind(image_link)
            .fetch_optional(pool)
            .await
    }

    /// Delete a member, returning the removed row so its image can be
    /// cleaned up.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Member>, sqlx::Error> {
        let query = format!(
            "WITH m AS (DELETE FROM members WHERE id = $1 RETURNING *)
             SELECT {COLUMNS} FROM m LEFT JOIN teams t ON t.id = m.team_id"
        );
        sqlx::query_as::<_, Member>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Number of members assigned to a team.
    pub async fn count_by_team(pool: &PgPool, team_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM members WHERE team_id = $1")
            .bind(team_id)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
