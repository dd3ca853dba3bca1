pub mod auth;
pub mod edits;
pub mod health;
pub mod videos;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/signup                      signup (public)
/// /auth/login                       login (public)
/// /auth/logout                      logout
/// /auth/me                          current session
///
/// /videos                           list, register
/// /videos/{id}                      get
/// /videos/{id}/edits                submit edit (202), edit history
/// /videos/{id}/prompts              prompt history, clear
/// /videos/{id}/save                 save notice
/// /videos/{id}/share                share link + notice
///
/// /edits/{id}                       edit request status
/// /edits/{id}/cancel                cancel a running edit
///
/// /events                           SSE stream of the caller's events
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/videos", videos::router())
        .nest("/edits", edits::router())
        .route("/events", get(handlers::events::stream_events))
}
