//! Videos that edit requests are made against.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{new_id, EntityId, Timestamp};

/// Prefix for generated video identifiers.
pub const VIDEO_ID_PREFIX: &str = "vid";

/// Maximum length of a video title.
pub const MAX_TITLE_LEN: usize = 200;

/// Processing state of a video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VideoStatus {
    Uploaded,
    Processing,
    Ready,
    Failed,
}

impl VideoStatus {
    pub const ALL: [VideoStatus; 4] = [Self::Uploaded, Self::Processing, Self::Ready, Self::Failed];

    pub fn label(self) -> &'static str {
        match self {
            Self::Uploaded => "Uploaded",
            Self::Processing => "Processing",
            Self::Ready => "Ready",
            Self::Failed => "Failed",
        }
    }

    pub fn from_label(label: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|s| s.label() == label)
            .ok_or_else(|| CoreError::Validation(format!("Unknown video status '{label}'")))
    }
}

/// A stored video with its original and (optionally) edited file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub id: EntityId,
    pub owner_id: EntityId,
    /// URI of the uploaded or recorded source file.
    pub original_video_file: String,
    /// URI of the latest processed result.
    pub edited_video_file: Option<String>,
    pub video_title: String,
    pub video_description: Option<String>,
    pub created_date: Timestamp,
    pub status: VideoStatus,
}

/// Input for registering a new video.
#[derive(Debug, Clone, Deserialize)]
pub struct NewVideo {
    pub original_video_file: String,
    pub video_title: String,
    pub video_description: Option<String>,
}

impl NewVideo {
    /// Check the user-supplied fields, returning a trimmed copy.
    pub fn validated(self) -> Result<Self, CoreError> {
        let original_video_file = self.original_video_file.trim().to_string();
        if original_video_file.is_empty() {
            return Err(CoreError::Validation("Video file URI must not be empty".into()));
        }

        let video_title = self.video_title.trim().to_string();
        if video_title.is_empty() {
            return Err(CoreError::Validation("Video title must not be empty".into()));
        }
        if video_title.chars().count() > MAX_TITLE_LEN {
            return Err(CoreError::Validation(format!(
                "Video title must be at most {MAX_TITLE_LEN} characters"
            )));
        }

        let video_description = self
            .video_description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        Ok(Self {
            original_video_file,
            video_title,
            video_description,
        })
    }
}

impl Video {
    /// Build a freshly uploaded video owned by `owner_id`.
    pub fn from_new(owner_id: impl Into<EntityId>, input: NewVideo) -> Self {
        Self {
            id: new_id(VIDEO_ID_PREFIX),
            owner_id: owner_id.into(),
            original_video_file: input.original_video_file,
            edited_video_file: None,
            video_title: input.video_title,
            video_description: input.video_description,
            created_date: Utc::now(),
            status: VideoStatus::Uploaded,
        }
    }

    /// The file a new edit should start from: the source upload.
    pub fn source_uri(&self) -> &str {
        &self.original_video_file
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.owner_id == user_id
    }
}
