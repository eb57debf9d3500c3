//! First-run admin account seeding.
//!
//! A fresh database has no users, so nobody could sign in to create one.
//! When `ADMIN_USERNAME` and `ADMIN_PASSWORD` are set, startup creates that
//! account unless the username is already taken.

use ajfses_core::roles::ROLE_ADMIN;
use ajfses_db::models::user::CreateUser;
use ajfses_db::repositories::UserRepo;
use ajfses_db::DbPool;

use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::error::{AppError, AppResult};

/// Credentials for the seeded admin.
#[derive(Clone)]
pub struct AdminSeed {
    pub username: String,
    pub password: String,
    pub email: String,
    pub name: String,
}

impl std::fmt::Debug for AdminSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSeed")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl AdminSeed {
    /// Read the seed from the environment.
    ///
    /// | Env Var          | Required | Default                   |
    /// |------------------|----------|---------------------------|
    /// | `ADMIN_USERNAME` | yes      | --                        |
    /// | `ADMIN_PASSWORD` | yes      | --                        |
    /// | `ADMIN_EMAIL`    | no       | `{username}@localhost`    |
    /// | `ADMIN_NAME`     | no       | `Administrator`           |
    ///
    /// Returns `None` unless both username and password are non-empty.
    pub fn from_env() -> Option<Self> {
        let read = |key: &str| {
            std::env::var(key)
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let username = read("ADMIN_USERNAME")?;
        let password = read("ADMIN_PASSWORD")?;
        let email = read("ADMIN_EMAIL").unwrap_or_else(|| format!("{username}@localhost"));
        let name = read("ADMIN_NAME").unwrap_or_else(|| "Administrator".to_string());

        Some(Self {
            username,
            password,
            email,
            name,
        })
    }
}

/// Create the seed admin if its username is free. Returns `true` when a
/// user was created.
pub async fn seed_admin(pool: &DbPool, seed: &AdminSeed) -> AppResult<bool> {
    if UserRepo::find_by_username(pool, &seed.username)
        .await?
        .is_some()
    {
        tracing::debug!(username = %seed.username, "Seed admin already exists");
        return Ok(false);
    }

    validate_password_strength(&seed.password, MIN_PASSWORD_LENGTH)
        .map_err(AppError::BadRequest)?;
    let password_hash = hash_password(&seed.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        pool,
        &CreateUser {
            name: seed.name.clone(),
            username: seed.username.clone(),
            email: seed.email.clone(),
            password_hash,
            role: ROLE_ADMIN.to_string(),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, username = %user.username, "Seeded admin account");
    Ok(true)
}
