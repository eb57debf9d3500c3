//! Repository for the `clients` table.

use ajfses_core::client::{STATUS_ACTIVE, STATUS_COMPLETED};
use ajfses_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::client::{Client, ClientMetrics, CreateClient, UpdateClient};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, area, service_name, service_date, status, note, \
                       image_link, created_at, updated_at";

/// Provides CRUD operations and metrics for clients.
pub struct ClientRepo;

impl ClientRepo {
    /// Insert a client inside `tx` with no image link yet.
    pub async fn create_tx(
        tx: &mut Transaction<'_, Postgres>,
        input: &CreateClient,
    ) -> Result<Client, sqlx::Error> {
        let query = format!(
            "INSERT INTO clients (name, area, service_name, service_date, status, note)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(&input.name)
            .bind(&input.area)
            .bind(&input.service_name)
            .bind(input.service_date)
            .bind(&input.status)
            .bind(&input.note)
            .fetch_one(&mut **tx)
            .await
    }

    /// Point a client created in `tx` at its stored image file.
    pub async fn set_image_link_tx(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
        image_link: &str,
    ) -> Result<Client, sqlx::Error> {
        let query = format!("UPDATE clients SET image_link = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .bind(image_link)
            .fetch_one(&mut **tx)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Client>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clients WHERE id = $1");
        sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List clients newest first, optionally filtered by status
    /// (case-insensitive).
    pub async fn list(pool: &PgPool, status: Option<&str>) -> Result<Vec<Client>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM clients
             WHERE ($1::TEXT IS NULL OR LOWER(status) = LOWER($1))
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    /// Update a client. Only non-`None` fields (and `image_link`, when
    /// given) are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateClient,
        image_link: Option<&str>,
    ) -> Result<Option<Client>, sqlx::Error> {
        let query = format!(
            "UPDATE clients SET
                name = COALESCE($2, name),
                area = COALESCE($3, area),
                service_name = COALESCE($4, service_name),
                service_date = COALESCE($5, service_date),
                status = COALESCE($6, status),
                note = COALESCE($7, note),
                image_link = COALESCE($8, image_link)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.area)
            .bind(&input.service_name)
            .bind(input.service_date)
            .bind(&input.status)
            .bind(&input.note)
            .bind(image_link)
            .fetch_optional(pool)
            .await
    }

    /// Delete a client, returning the removed row so its image can be
    /// cleaned up.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Client>, sqlx::Error> {
        let query = format!("DELETE FROM clients WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Distinct client names plus active and completed project counts.
    pub async fn metrics(pool: &PgPool) -> Result<ClientMetrics, sqlx::Error> {
        sqlx::query_as::<_, ClientMetrics>(
            "SELECT
                COUNT(DISTINCT name) AS total_clients,
                COUNT(*) FILTER (WHERE LOWER(status) = LOWER($1)) AS active_projects,
                COUNT(*) FILTER (WHERE LOWER(status) = LOWER($2)) AS completed_projects
             FROM clients",
        )
        .bind(STATUS_ACTIVE)
        .bind(STATUS_COMPLETED)
        .fetch_one(pool)
        .await
    }
}
