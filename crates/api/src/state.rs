use std::sync::Arc;

use ajfses_core::image_store::ImageStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: ajfses_db::DbPool,
    /// Server configuration (JWT settings, environment name).
    pub config: Arc<ServerConfig>,
    /// On-disk image storage served under `/api/v1/images`.
    pub images: Arc<ImageStore>,
}
