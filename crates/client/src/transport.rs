//! The two calls the edit workflow depends on.
//!
//! [`EditServiceApi`] implements both traits over HTTP; tests and
//! alternative backends can provide their own implementations.

use async_trait::async_trait;
use promptcut_core::edit_plan::EditPlan;
use promptcut_core::prompt::PromptEntry;

use crate::api::{EditServiceApi, EditServiceError};
use crate::messages::{AiEditRequest, ProcessEditRequest};

/// Produces an edit plan from a prompt.
#[async_trait]
pub trait PlanRequester: Send + Sync {
    /// `history` is the caller's earlier prompts for the same video, oldest
    /// first; empty means no conversation context. `idempotency_key` is the
    /// edit request id.
    async fn request_plan(
        &self,
        prompt: &str,
        video_id: &str,
        history: &[PromptEntry],
        idempotency_key: &str,
    ) -> Result<EditPlan, EditServiceError>;
}

/// Applies an edit plan to a video.
#[async_trait]
pub trait VideoProcessor: Send + Sync {
    /// Returns the URI of the processed video.
    async fn process(
        &self,
        video_uri: &str,
        plan: &EditPlan,
        idempotency_key: &str,
    ) -> Result<String, EditServiceError>;
}

#[async_trait]
impl PlanRequester for EditServiceApi {
    async fn request_plan(
        &self,
        prompt: &str,
        video_id: &str,
        history: &[PromptEntry],
        idempotency_key: &str,
    ) -> Result<EditPlan, EditServiceError> {
        let request = AiEditRequest {
            prompt: prompt.to_string(),
            video_id: video_id.to_string(),
            conversation_history: (!history.is_empty()).then(|| history.to_vec()),
        };
        self.request_edit_plan(&request, Some(idempotency_key)).await
    }
}

#[async_trait]
impl VideoProcessor for EditServiceApi {
    async fn process(
        &self,
        video_uri: &str,
        plan: &EditPlan,
        idempotency_key: &str,
    ) -> Result<String, EditServiceError> {
        let request = ProcessEditRequest {
            video_file_url: video_uri.to_string(),
            edit_plan: plan.clone(),
        };
        self.process_edits(&request, Some(idempotency_key)).await
    }
}
