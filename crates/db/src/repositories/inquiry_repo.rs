//! Repository for the `inquiries` table.

use std::collections::BTreeMap;

use ajfses_core::inquiry::KNOWN_STATUSES;
use ajfses_core::types::DbId;
use sqlx::PgPool;

use crate::models::inquiry::{CreateInquiry, Inquiry, UpdateInquiry};

const COLUMNS: &str = "id, inquiry_date, name, mobile, email, subject, message, status, \
                       created_at, updated_at";

/// Provides CRUD operations and status counts for inquiries.
pub struct InquiryRepo;

impl InquiryRepo {
    /// Insert a new inquiry with the default `NEW` status.
    pub async fn create(pool: &PgPool, input: &CreateInquiry) -> Result<Inquiry, sqlx::Error> {
        let query = format!(
            "INSERT INTO inquiries (name, mobile, email, subject, message)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Inquiry>(&query)
            .bind(&input.name)
            .bind(&input.mobile)
            .bind(&input.email)
            .bind(&input.subject)
            .bind(&input.message)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Inquiry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM inquiries WHERE id = $1");
        sqlx::query_as::<_, Inquiry>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List inquiries newest first, optionally filtered by exact status.
    pub async fn list(
        pool: &PgPool,
        status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Inquiry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM inquiries
             WHERE ($1::TEXT IS NULL OR status = $1)
             ORDER BY inquiry_date DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Inquiry>(&query)
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count inquiries per status. Every known status is present, even at zero.
    pub async fn status_counts(pool: &PgPool) -> Result<BTreeMap<String, i64>, sqlx::Error> {
        let rows: Vec<(String, i64)> =
            sqlx::query_as("SELECT status, COUNT(*) FROM inquiries GROUP BY status")
                .fetch_all(pool)
                .await?;

        let mut counts: BTreeMap<String, i64> = KNOWN_STATUSES
            .iter()
            .map(|s| (s.to_string(), 0))
            .collect();
        counts.extend(rows);
        Ok(counts)
    }

    /// Update an inquiry. Only non-`None` fields are applied; `status` must
    /// already be canonical.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateInquiry,
    ) -> Result<Option<Inquiry>, sqlx::Error> {
        let query = format!(
            "UPDATE inquiries SET
                name = COALESCE($2, name),
                mobile = COALESCE($3, mobile),
                email = COALESCE($4, email),
                subject = COALESCE($5, subject),
                message = COALESCE($6, message),
                status = COALESCE($7, status)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Inquiry>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.mobile)
            .bind(&input.email)
            .bind(&input.subject)
            .bind(&input.message)
            .bind(&input.status)
            .fetch_optional(pool)
            .await
    }

    /// Delete an inquiry. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM inquiries WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
