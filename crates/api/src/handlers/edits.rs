//! Handlers for the `/edits` resource (status lookup and cancellation).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use promptcut_core::edit_request::{EditRequest, StatusTone};
use promptcut_core::error::CoreError;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthSession;
use crate::response::DataResponse;
use crate::state::AppState;

/// An edit request plus what a client needs to render its status badge.
#[derive(Debug, Serialize)]
pub struct EditStatusResponse {
    #[serde(flatten)]
    pub edit_request: EditRequest,
    pub tone: StatusTone,
    pub is_terminal: bool,
}

impl From<EditRequest> for EditStatusResponse {
    fn from(edit_request: EditRequest) -> Self {
        Self {
            tone: edit_request.status.tone(),
            is_terminal: edit_request.status.is_terminal(),
            edit_request,
        }
    }
}

/// GET /api/v1/edits/{id}
pub async fn get_edit(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<EditStatusResponse>>> {
    let request = load_owned_edit(&state, &auth, &id).await?;
    Ok(Json(DataResponse {
        data: request.into(),
    }))
}

/// POST /api/v1/edits/{id}/cancel
///
/// Abort a running edit. Responds 202; the request moves to `Error` once
/// the in-flight call has been dropped. A cancel that arrives after the
/// processed video has been stored loses the race and the request still
/// ends `Completed`.
pub async fn cancel_edit(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(id): Path<String>,
) -> AppResult<(StatusCode, Json<DataResponse<EditStatusResponse>>)> {
    let request = load_owned_edit(&state, &auth, &id).await?;

    if request.status.is_terminal() || !state.workflow.cancel(&request.id).await {
        return Err(CoreError::Conflict(format!(
            "Edit request {} is not running",
            request.id
        ))
        .into());
    }

    Ok((
        StatusCode::ACCEPTED,
        Json(DataResponse {
            data: request.into(),
        }),
    ))
}

/// Fetch an edit request and check that the caller submitted it.
async fn load_owned_edit(state: &AppState, auth: &AuthSession, id: &str) -> AppResult<EditRequest> {
    let request = state
        .edit_requests
        .find_by_id(id)
        .await?
        .ok_or_else(|| CoreError::not_found("EditRequest", id))?;

    if request.user_id != auth.user_id() {
        return Err(CoreError::Forbidden("You do not own this edit request".into()).into());
    }
    Ok(request)
}
