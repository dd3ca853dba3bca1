//! Mapping from sqlx errors to domain errors.

use promptcut_core::error::CoreError;

/// PostgreSQL SQLSTATE for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";

/// Convert a sqlx error into a [`CoreError`].
///
/// Unique violations on `uq_`-prefixed constraints become `Conflict`;
/// everything else is logged and reported as `Internal`.
pub fn map_sqlx_error(err: sqlx::Error) -> CoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            let constraint = db_err.constraint().unwrap_or("unknown");
            if constraint.starts_with("uq_") {
                return CoreError::Conflict(format!(
                    "Duplicate value violates unique constraint: {constraint}"
                ));
            }
        }
    }
    tracing::error!(error = %err, "Database error");
    CoreError::Internal(format!("Database error: {err}"))
}
