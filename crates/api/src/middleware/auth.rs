//! Session-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use promptcut_core::error::CoreError;
use promptcut_core::session::Session;

use crate::error::AppError;
use crate::state::AppState;

/// The caller's session, resolved from `Authorization: Bearer <token>`.
///
/// Handlers that act on behalf of a user take this as a parameter; the
/// session is never looked up from anywhere else.
///
/// ```ignore
/// async fn my_handler(auth: AuthSession) -> AppResult<Json<()>> {
///     tracing::info!(user_id = %auth.user_id(), "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub session: Session,
    /// Plaintext token, kept so logout can close this exact session.
    pub(crate) token: String,
}

impl AuthSession {
    pub fn user_id(&self) -> &str {
        &self.session.user_id
    }
}

impl FromRequestParts<AppState> for AuthSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let session = state.sessions.resolve(token).await.ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired session".into()))
        })?;

        Ok(AuthSession {
            session,
            token: token.to_string(),
        })
    }
}
