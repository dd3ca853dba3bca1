//! Handlers for the `/videos` resource and the edit submission endpoint.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use promptcut_core::edit_request::EditRequest;
use promptcut_core::error::CoreError;
use promptcut_core::notice::Notice;
use promptcut_core::prompt::PromptEntry;
use promptcut_core::video::{NewVideo, Video};
use promptcut_events::{event_types, EditEvent};
use promptcut_pipeline::SubmitEdit;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::middleware::auth::AuthSession;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /videos/{id}/edits`.
#[derive(Debug, Deserialize)]
pub struct SubmitEditRequest {
    pub prompt: String,
}

/// Returned by the save endpoint.
#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub video: Video,
    pub notice: Notice,
}

/// Returned by the share endpoint.
#[derive(Debug, Serialize)]
pub struct ShareResponse {
    pub video_id: String,
    /// The edited file when there is one, otherwise the original.
    pub share_url: String,
    pub notice: Notice,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/videos
pub async fn list_videos(
    State(state): State<AppState>,
    auth: AuthSession,
) -> AppResult<Json<DataResponse<Vec<Video>>>> {
    let videos = state.videos.list_by_owner(auth.user_id()).await?;
    Ok(Json(DataResponse { data: videos }))
}

/// POST /api/v1/videos
///
/// Register an uploaded or recorded video by URI.
pub async fn create_video(
    State(state): State<AppState>,
    auth: AuthSession,
    Json(input): Json<NewVideo>,
) -> AppResult<(StatusCode, Json<DataResponse<Video>>)> {
    let input = input.validated()?;
    let video = state.videos.create(auth.user_id(), input).await?;

    tracing::info!(video_id = %video.id, user_id = %auth.user_id(), "Video registered");
    state.event_bus.publish(
        EditEvent::new(event_types::VIDEO_UPLOADED)
            .with_video(video.id.clone())
            .with_actor(auth.user_id())
            .with_notice(Notice::upload(None)),
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: video })))
}

/// GET /api/v1/videos/{id}
pub async fn get_video(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<Video>>> {
    let video = load_owned_video(&state, &auth, &id).await?;
    Ok(Json(DataResponse { data: video }))
}

/// POST /api/v1/videos/{id}/edits
///
/// Start an edit. Responds 202 with the `In Progress` record; progress is
/// reported on the event stream and via `GET /edits/{id}`.
pub async fn submit_edit(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(id): Path<String>,
    Json(input): Json<SubmitEditRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<EditRequest>>)> {
    let video = load_owned_video(&state, &auth, &id).await?;
    let history = state.prompts.snapshot(auth.user_id(), &video.id).await;

    let request = state
        .workflow
        .spawn(SubmitEdit {
            video_id: video.id.clone(),
            user_id: auth.user_id().to_string(),
            prompt: input.prompt,
            video_uri: video.source_uri().to_string(),
            history,
        })
        .await?;

    state
        .prompts
        .append(
            auth.user_id(),
            &video.id,
            PromptEntry::now(request.prompt_text.clone()),
        )
        .await;

    Ok((StatusCode::ACCEPTED, Json(DataResponse { data: request })))
}

/// GET /api/v1/videos/{id}/edits
///
/// Edit requests for the video, oldest first.
pub async fn list_edits(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<Vec<EditRequest>>>> {
    let video = load_owned_video(&state, &auth, &id).await?;
    let requests = state.edit_requests.list_for_video(&video.id).await?;
    Ok(Json(DataResponse { data: requests }))
}

/// GET /api/v1/videos/{id}/prompts
pub async fn list_prompts(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<Vec<PromptEntry>>>> {
    let video = load_owned_video(&state, &auth, &id).await?;
    let history = state.prompts.snapshot(auth.user_id(), &video.id).await;
    Ok(Json(DataResponse { data: history }))
}

/// DELETE /api/v1/videos/{id}/prompts
pub async fn clear_prompts(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let video = load_owned_video(&state, &auth, &id).await?;
    state.prompts.clear(auth.user_id(), &video.id).await;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/videos/{id}/save
pub async fn save_video(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<SaveResponse>>> {
    let video = load_owned_video(&state, &auth, &id).await?;
    let notice = Notice::save();

    state.event_bus.publish(
        EditEvent::new(event_types::VIDEO_SAVED)
            .with_video(video.id.clone())
            .with_actor(auth.user_id())
            .with_notice(notice.clone()),
    );

    Ok(Json(DataResponse {
        data: SaveResponse { video, notice },
    }))
}

/// POST /api/v1/videos/{id}/share
pub async fn share_video(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<ShareResponse>>> {
    let video = load_owned_video(&state, &auth, &id).await?;
    let share_url = video
        .edited_video_file
        .clone()
        .unwrap_or_else(|| video.original_video_file.clone());
    let notice = Notice::share();

    state.event_bus.publish(
        EditEvent::new(event_types::VIDEO_SHARED)
            .with_video(video.id.clone())
            .with_actor(auth.user_id())
            .with_notice(notice.clone())
            .with_payload(serde_json::json!({ "share_url": share_url })),
    );

    Ok(Json(DataResponse {
        data: ShareResponse {
            video_id: video.id,
            share_url,
            notice,
        },
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fetch a video and check that the caller owns it.
pub(crate) async fn load_owned_video(
    state: &AppState,
    auth: &AuthSession,
    id: &str,
) -> AppResult<Video> {
    let video = state
        .videos
        .get_by_id(id)
        .await?
        .ok_or_else(|| CoreError::not_found("Video", id))?;

    if !video.is_owned_by(auth.user_id()) {
        return Err(CoreError::Forbidden("You do not own this video".into()).into());
    }
    Ok(video)
}
