use std::path::PathBuf;

use crate::auth::jwt::JwtConfig;
use crate::bootstrap::AdminSeed;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// Deployment name reported by `/api/v1/ping` (default: `development`).
    pub app_env: String,
    /// Allowed CORS origins from comma-separated `CORS_ORIGINS`. A single
    /// `*` allows any origin.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Root of on-disk image storage (default: `data/images`).
    pub image_dir: PathBuf,
    /// JWT signing and validation settings.
    pub jwt: JwtConfig,
    /// First admin account to create at startup, if configured.
    pub admin_seed: Option<AdminSeed>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default       |
    /// |------------------------|---------------|
    /// | `HOST`                 | `0.0.0.0`     |
    /// | `PORT`                 | `8080`        |
    /// | `APP_ENV`              | `development` |
    /// | `CORS_ORIGINS`         | `*`           |
    /// | `REQUEST_TIMEOUT_SECS` | `30`          |
    /// | `IMAGE_DIR`            | `data/images` |
    ///
    /// See [`JwtConfig::from_env`] and [`AdminSeed::from_env`] for the rest.
    ///
    /// # Panics
    ///
    /// Panics on unparsable numbers or a missing `JWT_SECRET`; misconfiguration
    /// should stop the server before it binds.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".into())
            .parse()
            .expect("PORT must be a valid u16");

        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let image_dir = PathBuf::from(
            std::env::var("IMAGE_DIR").unwrap_or_else(|_| "data/images".into()),
        );

        Self {
            host,
            port,
            app_env,
            cors_origins,
            request_timeout_secs,
            image_dir,
            jwt: JwtConfig::from_env(),
            admin_seed: AdminSeed::from_env(),
        }
    }

    /// Whether CORS should accept any origin.
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.is_empty() || self.cors_origins.iter().any(|o| o == "*")
    }
}
