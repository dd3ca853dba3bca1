//! Route definitions for the `/edits` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::edits;
use crate::state::AppState;

/// Routes mounted at `/edits`. All require auth.
///
/// ```text
/// GET  /{id}          -> get_edit
/// POST /{id}/cancel   -> cancel_edit
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(edits::get_edit))
        .route("/{id}/cancel", post(edits::cancel_edit))
}
