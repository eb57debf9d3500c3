//! Gallery item model and DTOs.

use ajfses_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `gallery_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GalleryItem {
    pub id: DbId,
    pub title: String,
    pub image_link: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreateGalleryItem {
    pub title: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateGalleryItem {
    pub title: Option<String>,
}
