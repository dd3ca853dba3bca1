//! REST API client for the edit service HTTP endpoints.
//!
//! Wraps plan requests (`POST /video/aiEdit`) and edit processing
//! (`POST /video/processEdits`) using [`reqwest`]. Every failure, whether
//! transport-level or an explicit `status: "error"` payload, comes back as
//! an [`EditServiceError`]. Nothing is retried.

use promptcut_core::edit_plan::EditPlan;
use reqwest::header::AUTHORIZATION;

use crate::config::EditServiceConfig;
use crate::messages::{
    AiEditRequest, AiEditResponse, ProcessEditRequest, ProcessEditResponse, ResponseStatus,
};

/// Header carrying the edit request id, so the service can deduplicate.
pub const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";

/// Fallback message when the planner reports failure without one.
pub const DEFAULT_PLAN_FAILURE: &str = "AI processing failed";

/// Fallback message when the processor reports failure without one.
pub const DEFAULT_PROCESS_FAILURE: &str = "Video processing failed";

/// Errors from the edit service REST layer.
#[derive(Debug, thiserror::Error)]
pub enum EditServiceError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, body decode).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("Edit service error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The service answered but reported failure, or left out the result.
    #[error("{message}")]
    Upstream { message: String },
}

impl EditServiceError {
    /// Network failures and non-2xx responses.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Request(_) | Self::Api { .. })
    }

    /// Explicit failures reported in a well-formed response body.
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream { .. })
    }
}

/// HTTP client for the edit service.
#[derive(Clone)]
pub struct EditServiceApi {
    client: reqwest::Client,
    config: EditServiceConfig,
}

impl EditServiceApi {
    /// Create a new API client.
    pub fn new(config: EditServiceConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Create an API client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling).
    pub fn with_client(client: reqwest::Client, config: EditServiceConfig) -> Self {
        Self { client, config }
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Ask the planner for an edit plan.
    ///
    /// Returns the plan on `status: "success"`. A `status: "error"` body,
    /// or a success body without `editPlan`, becomes
    /// [`EditServiceError::Upstream`].
    pub async fn request_edit_plan(
        &self,
        request: &AiEditRequest,
        idempotency_key: Option<&str>,
    ) -> Result<EditPlan, EditServiceError> {
        tracing::debug!(video_id = %request.video_id, "Requesting edit plan");

        let response: AiEditResponse = self
            .post_json("/video/aiEdit", request, idempotency_key)
            .await?;

        match (response.status, response.edit_plan) {
            (ResponseStatus::Success, Some(plan)) => Ok(plan),
            (_, _) => Err(EditServiceError::Upstream {
                message: response
                    .message
                    .unwrap_or_else(|| DEFAULT_PLAN_FAILURE.to_string()),
            }),
        }
    }

    /// Apply an edit plan to a video, returning the processed video URL.
    pub async fn process_edits(
        &self,
        request: &ProcessEditRequest,
        idempotency_key: Option<&str>,
    ) -> Result<String, EditServiceError> {
        tracing::debug!(
            video_file_url = %request.video_file_url,
            effects = request.edit_plan.effects.len(),
            "Submitting edit plan for processing",
        );

        let response: ProcessEditResponse = self
            .post_json("/video/processEdits", request, idempotency_key)
            .await?;

        match (response.status, response.edited_video_url) {
            (ResponseStatus::Success, Some(url)) => Ok(url),
            (_, _) => Err(EditServiceError::Upstream {
                message: response
                    .message
                    .unwrap_or_else(|| DEFAULT_PROCESS_FAILURE.to_string()),
            }),
        }
    }

    // ---- private helpers ----

    async fn post_json<B, T>(
        &self,
        path: &str,
        body: &B,
        idempotency_key: Option<&str>,
    ) -> Result<T, EditServiceError>
    where
        B: serde::Serialize + ?Sized,
        T: serde::de::DeserializeOwned,
    {
        let mut builder = self
            .client
            .post(format!("{}{}", self.config.base_url, path))
            .timeout(self.config.timeout)
            .json(body);

        if let Some(token) = &self.config.api_token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        if let Some(key) = idempotency_key {
            builder = builder.header(IDEMPOTENCY_KEY_HEADER, key);
        }

        let response = builder.send().await?;
        Self::parse_response(response).await
    }

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or an [`EditServiceError::Api`]
    /// containing the status and body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, EditServiceError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(EditServiceError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, EditServiceError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}
