use promptcut_client::api::{DEFAULT_PLAN_FAILURE, DEFAULT_PROCESS_FAILURE};
use promptcut_client::EditServiceError;
use promptcut_core::error::CoreError;

/// The two external calls an edit request goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowStep {
    Plan,
    Process,
}

impl WorkflowStep {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Plan => "plan",
            Self::Process => "process",
        }
    }

    pub(crate) fn wrap(self, err: EditServiceError) -> WorkflowError {
        match self {
            Self::Plan => WorkflowError::Plan(err),
            Self::Process => WorkflowError::Processing(err),
        }
    }
}

impl std::fmt::Display for WorkflowStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why an edit request did not complete.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    /// The planning call failed or returned no plan.
    #[error("Plan request failed: {0}")]
    Plan(EditServiceError),

    /// The processing call failed or returned no video URL.
    #[error("Video processing failed: {0}")]
    Processing(EditServiceError),

    #[error("The {step} step timed out")]
    Timeout { step: WorkflowStep },

    #[error("Edit request was cancelled")]
    Cancelled,

    #[error("Video {video_id} already has an edit in progress")]
    VideoBusy { video_id: String },

    /// Validation or persistence failure.
    #[error(transparent)]
    Store(#[from] CoreError),
}

impl WorkflowError {
    /// The external step the failure happened in, if any.
    pub fn step(&self) -> Option<WorkflowStep> {
        match self {
            Self::Plan(_) => Some(WorkflowStep::Plan),
            Self::Processing(_) => Some(WorkflowStep::Process),
            Self::Timeout { step } => Some(*step),
            Self::Cancelled | Self::VideoBusy { .. } | Self::Store(_) => None,
        }
    }

    /// Text shown to the user in the failure notice.
    ///
    /// A message supplied by the edit service is passed through as is;
    /// transport and internal details are replaced with generic text.
    pub fn user_message(&self) -> String {
        match self {
            Self::Plan(EditServiceError::Upstream { message })
            | Self::Processing(EditServiceError::Upstream { message }) => message.clone(),
            Self::Plan(_) => DEFAULT_PLAN_FAILURE.to_string(),
            Self::Processing(_) => DEFAULT_PROCESS_FAILURE.to_string(),
            Self::Timeout { step: WorkflowStep::Plan } => "AI processing timed out".to_string(),
            Self::Timeout { step: WorkflowStep::Process } => {
                "Video processing timed out".to_string()
            }
            Self::Cancelled | Self::VideoBusy { .. } => self.to_string(),
            Self::Store(CoreError::Validation(msg)) => msg.clone(),
            Self::Store(_) => "There was an error processing your video".to_string(),
        }
    }
}
