//! Handlers for the `/auth` resource (sign-in, password reset).

use ajfses_core::error::CoreError;
use ajfses_core::roles::ROLE_ADMIN;
use ajfses_db::models::user::UserResponse;
use ajfses_db::repositories::UserRepo;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::{generate_access_token, TokenSubject};
use crate::auth::password::{
    hash_password, validate_password_strength, verify_password, MIN_PASSWORD_LENGTH,
};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Maximum consecutive failed sign-in attempts before locking the account.
const MAX_FAILED_ATTEMPTS: i32 = 5;

/// Duration in minutes to lock an account after exceeding failed attempts.
const LOCK_DURATION_MINS: i64 = 15;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/signin`.
#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Successful sign-in response.
#[derive(Debug, Serialize)]
pub struct SigninResponse {
    pub access_token: String,
    pub token_type: &'static str,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

/// Request body for `PATCH /auth/admin/reset-password`.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    #[serde(default)]
    pub new_password: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/signin
///
/// Authenticate an admin with username + password and issue an access token.
pub async fn signin(
    State(state): State<AppState>,
    Json(input): Json<SigninRequest>,
) -> AppResult<Json<SigninResponse>> {
    let username = input.username.trim();
    let password = input.password.trim();
    if username.is_empty() || password.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "username and password are required".into(),
        )));
    }

    let invalid = || AppError::Core(CoreError::Unauthorized("Invalid username or password".into()));

    // 1. Find user by username.
    let user = UserRepo::find_by_username(&state.pool, username)
        .await?
        .ok_or_else(invalid)?;

    // 2. Check if the account is active.
    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    // 3. Check if the account is temporarily locked.
    if let Some(locked_until) = user.locked_until {
        if locked_until > Utc::now() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Account is temporarily locked. Try again later.".into(),
            )));
        }
    }

    // 4. Verify password.
    let password_valid = verify_password(password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        // 5. On failure: increment counter, lock if threshold reached.
        let failures = UserRepo::increment_failed_login(&state.pool, user.id).await?;
        if failures >= MAX_FAILED_ATTEMPTS {
            let lock_until = Utc::now() + chrono::Duration::minutes(LOCK_DURATION_MINS);
            UserRepo::lock_account(&state.pool, user.id, lock_until).await?;
            tracing::warn!(user_id = user.id, failures, "Account locked after failed sign-ins");
        }
        return Err(invalid());
    }

    // 6. Only admins may use the panel.
    if user.role != ROLE_ADMIN {
        return Err(AppError::Core(CoreError::Forbidden(
            "Admin role required".into(),
        )));
    }

    // 7. On success: reset failed count, set last_login_at.
    UserRepo::record_successful_login(&state.pool, user.id).await?;

    let access_token = generate_access_token(
        TokenSubject {
            user_id: user.id,
            name: &user.name,
            username: &user.username,
            role: &user.role,
        },
        &state.config.jwt,
    )
    .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, "Admin signed in");

    Ok(Json(SigninResponse {
        access_token,
        token_type: "Bearer",
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        user: UserResponse::from(&user),
    }))
}

/// PATCH /api/v1/auth/admin/reset-password
///
/// Replace the signed-in admin's own password. Returns 204 No Content.
pub async fn reset_password(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<ResetPasswordRequest>,
) -> AppResult<StatusCode> {
    let new_password = input.new_password.trim();
    validate_password_strength(new_password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let updated = UserRepo::update_password(&state.pool, admin.user_id, &password_hash).await?;
    if !updated {
        return Err(AppError::Core(CoreError::not_found("User", admin.user_id)));
    }

    tracing::info!(user_id = admin.user_id, "Admin password reset");
    Ok(StatusCode::NO_CONTENT)
}
