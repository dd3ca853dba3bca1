//! Edit requests and their status machine.
//!
//! An [`EditRequest`] is created `In Progress` when a prompt is submitted
//! and ends in exactly one terminal state, `Completed` or `Error`. The
//! transitions are enforced by the methods on [`EditRequest`]; a request
//! that has reached a terminal state never changes status again.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::edit_plan::EditPlan;
use crate::error::CoreError;
use crate::types::{new_id, EntityId, Timestamp};

/// Prefix for generated edit request identifiers.
pub const EDIT_REQUEST_ID_PREFIX: &str = "edit";

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Lifecycle state of an edit request.
///
/// Serialized with the human-facing labels (`"In Progress"`, `"Completed"`,
/// `"Error"`), which are also the values stored in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditRequestStatus {
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Completed")]
    Completed,
    #[serde(rename = "Error")]
    Error,
}

/// Visual tone a client uses when rendering a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusTone {
    Pending,
    Success,
    Destructive,
}

impl EditRequestStatus {
    pub const ALL: [EditRequestStatus; 3] = [Self::InProgress, Self::Completed, Self::Error];

    /// Display label, identical to the serialized form.
    pub fn label(self) -> &'static str {
        match self {
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Error => "Error",
        }
    }

    /// Parse a stored label back into a status.
    pub fn from_label(label: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|s| s.label() == label)
            .ok_or_else(|| CoreError::Validation(format!("Unknown edit request status '{label}'")))
    }

    pub fn tone(self) -> StatusTone {
        match self {
            Self::InProgress => StatusTone::Pending,
            Self::Completed => StatusTone::Success,
            Self::Error => StatusTone::Destructive,
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::InProgress)
    }

    /// Only `InProgress -> Completed` and `InProgress -> Error` are legal.
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::InProgress, Self::Completed) | (Self::InProgress, Self::Error)
        )
    }
}

impl std::fmt::Display for EditRequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// EditRequest
// ---------------------------------------------------------------------------

/// One natural-language edit submitted against a video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditRequest {
    pub id: EntityId,
    /// The video being edited. Not owned by the request.
    pub video_id: EntityId,
    /// The submitting user. Not owned by the request.
    pub user_id: EntityId,
    pub prompt_text: String,
    /// Serialized [`EditPlan`], present once the planning step succeeded.
    pub response_json: Option<String>,
    pub created_date: Timestamp,
    pub status: EditRequestStatus,
}

impl EditRequest {
    /// Create a fresh request in the `InProgress` state.
    pub fn new(
        video_id: impl Into<EntityId>,
        user_id: impl Into<EntityId>,
        prompt_text: impl Into<String>,
    ) -> Self {
        Self {
            id: new_id(EDIT_REQUEST_ID_PREFIX),
            video_id: video_id.into(),
            user_id: user_id.into(),
            prompt_text: prompt_text.into(),
            response_json: None,
            created_date: Utc::now(),
            status: EditRequestStatus::InProgress,
        }
    }

    /// Attach the plan returned by the planning service.
    pub fn record_plan(&mut self, plan: &EditPlan) -> Result<(), CoreError> {
        if self.status.is_terminal() {
            return Err(CoreError::Conflict(format!(
                "Edit request {} is already {}",
                self.id, self.status
            )));
        }
        self.response_json = Some(plan.to_json_string());
        Ok(())
    }

    /// Mark the request as successfully completed.
    pub fn complete(&mut self) -> Result<(), CoreError> {
        self.transition(EditRequestStatus::Completed)
    }

    /// Mark the request as failed.
    pub fn fail(&mut self) -> Result<(), CoreError> {
        self.transition(EditRequestStatus::Error)
    }

    /// Deserialize the stored plan, if any.
    pub fn plan(&self) -> Result<Option<EditPlan>, CoreError> {
        self.response_json
            .as_deref()
            .map(serde_json::from_str)
            .transpose()
            .map_err(|e| CoreError::Internal(format!("Stored edit plan is not valid JSON: {e}")))
    }

    fn transition(&mut self, next: EditRequestStatus) -> Result<(), CoreError> {
        if !self.status.can_transition_to(next) {
            return Err(CoreError::Conflict(format!(
                "Edit request {} cannot move from {} to {}",
                self.id, self.status, next
            )));
        }
        self.status = next;
        Ok(())
    }
}
