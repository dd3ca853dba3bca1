//! Route definitions for the `/videos` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::videos;
use crate::state::AppState;

/// Routes mounted at `/videos`. All require auth.
///
/// ```text
/// GET    /                -> list_videos
/// POST   /                -> create_video
/// GET    /{id}            -> get_video
/// POST   /{id}/edits      -> submit_edit
/// GET    /{id}/edits      -> list_edits
/// GET    /{id}/prompts    -> list_prompts
/// DELETE /{id}/prompts    -> clear_prompts
/// POST   /{id}/save       -> save_video
/// POST   /{id}/share      -> share_video
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(videos::list_videos).post(videos::create_video))
        .route("/{id}", get(videos::get_video))
        .route(
            "/{id}/edits",
            get(videos::list_edits).post(videos::submit_edit),
        )
        .route(
            "/{id}/prompts",
            get(videos::list_prompts).delete(videos::clear_prompts),
        )
        .route("/{id}/save", post(videos::save_video))
        .route("/{id}/share", post(videos::share_video))
}
