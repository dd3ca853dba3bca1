//! Wire types for the edit service endpoints.
//!
//! Field names follow the service's camelCase JSON.

use promptcut_core::edit_plan::EditPlan;
use promptcut_core::prompt::PromptEntry;
use serde::{Deserialize, Serialize};

/// Discriminator present on every response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// Body of `POST {base}/video/aiEdit`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AiEditRequest {
    pub prompt: String,
    pub video_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_history: Option<Vec<PromptEntry>>,
}

/// Response of `POST {base}/video/aiEdit`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiEditResponse {
    pub status: ResponseStatus,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub edit_plan: Option<EditPlan>,
}

/// Body of `POST {base}/video/processEdits`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessEditRequest {
    pub video_file_url: String,
    pub edit_plan: EditPlan,
}

/// Response of `POST {base}/video/processEdits`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessEditResponse {
    pub status: ResponseStatus,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub edited_video_url: Option<String>,
}
