//! Repository for the `gallery_items` table.

use ajfses_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::gallery::{CreateGalleryItem, GalleryItem, UpdateGalleryItem};

const COLUMNS: &str = "id, title, image_link, created_at, updated_at";

/// Provides CRUD operations for gallery items.
pub struct GalleryRepo;

impl GalleryRepo {
    /// Insert a gallery item inside `tx` with no image link yet.
    pub async fn create_tx(
        tx: &mut Transaction<'_, Postgres>,
        input: &CreateGalleryItem,
    ) -> Result<GalleryItem, sqlx::Error> {
        let query = format!("INSERT INTO gallery_items (title) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, GalleryItem>(&query)
            .bind(&input.title)
            .fetch_one(&mut **tx)
            .await
    }

    /// Point an item created in `tx` at its stored image file.
    pub async fn set_image_link_tx(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
        image_link: &str,
    ) -> Result<GalleryItem, sqlx::Error> {
        let query =
            format!("UPDATE gallery_items SET image_link = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, GalleryItem>(&query)
            .bind(id)
            .bind(image_link)
            .fetch_one(&mut **tx)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<GalleryItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM gallery_items WHERE id = $1");
        sqlx::query_as::<_, GalleryItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List items newest first. `None` returns every item.
    pub async fn list(pool: &PgPool, limit: Option<i64>) -> Result<Vec<GalleryItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM gallery_items
             ORDER BY created_at DESC, id DESC
             LIMIT $1"
        );
        sqlx::query_as::<_, GalleryItem>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Update an item's title and/or image link.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateGalleryItem,
        image_link: Option<&str>,
    ) -> Result<Option<GalleryItem>, sqlx::Error> {
        let query = format!(
            "UPDATE gallery_items SET
                title = COALESCE($2, title),
                image_link = COALESCE($3, image_link)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GalleryItem>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(image_link)
            .fetch_optional(pool)
            .await
    }

    /// Delete an item, returning the removed row so its image can be
    /// cleaned up.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<GalleryItem>, sqlx::Error> {
        let query = format!("DELETE FROM gallery_items WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, GalleryItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
