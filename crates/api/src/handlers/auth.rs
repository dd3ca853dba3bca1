//! Handlers for the `/auth` resource (signup, login, logout, me).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use promptcut_core::error::CoreError;
use promptcut_core::session::Session;
use promptcut_core::types::Timestamp;
use promptcut_core::user::{normalize_email, NewUser, User};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::password::{
    hash_password, validate_password_strength, verify_password, MIN_PASSWORD_LENGTH,
};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthSession;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/signup`.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 1, max = 50, message = "Username must be 1-50 characters"))]
    pub username: String,
    #[validate(email(message = "Email address is not valid"))]
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Returned by signup and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    /// Opaque bearer token for the `Authorization` header.
    pub token: String,
    pub expires_at: Timestamp,
    pub user: User,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/signup
///
/// Create an account and open a session for it.
pub async fn signup(
    State(state): State<AppState>,
    Json(mut input): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<AuthResponse>>)> {
    input.username = input.username.trim().to_string();
    input.email = normalize_email(&input.email);
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = state
        .users
        .create(NewUser {
            username: input.username,
            email: input.email,
            password_hash,
        })
        .await?;

    tracing::info!(user_id = %user.id, "User signed up");

    let response = open_session(&state, user).await;
    Ok((StatusCode::CREATED, Json(DataResponse { data: response })))
}

/// POST /api/v1/auth/login
///
/// Authenticate with email + password.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<DataResponse<AuthResponse>>> {
    let invalid = || AppError::Core(CoreError::Unauthorized("Invalid email or password".into()));

    let user = state
        .users
        .find_by_email(&normalize_email(&input.email))
        .await?
        .ok_or_else(invalid)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(user_id = %user.id, "Login rejected: wrong password");
        return Err(invalid());
    }

    tracing::info!(user_id = %user.id, "User logged in");

    let response = open_session(&state, user).await;
    Ok(Json(DataResponse { data: response }))
}

/// POST /api/v1/auth/logout
///
/// End the caller's session. Returns 204 No Content.
pub async fn logout(State(state): State<AppState>, auth: AuthSession) -> StatusCode {
    state.sessions.close(&auth.token).await;
    tracing::info!(user_id = %auth.user_id(), "User logged out");
    StatusCode::NO_CONTENT
}

/// GET /api/v1/auth/me
pub async fn me(auth: AuthSession) -> Json<DataResponse<Session>> {
    Json(DataResponse { data: auth.session })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn open_session(state: &AppState, user: User) -> AuthResponse {
    let (token, session) = state.sessions.open(&user).await;
    AuthResponse {
        token,
        expires_at: session.expires_at,
        user,
    }
}
