//! Transient user-facing notices.
//!
//! Notices are the short title/description pairs a client shows as a
//! toast when something happens to a video or edit request. They are
//! published alongside events and never stored.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeVariant {
    Default,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub variant: NoticeVariant,
}

impl Notice {
    fn info(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            variant: NoticeVariant::Default,
        }
    }

    /// A video was uploaded or recorded. `title` overrides the heading.
    pub fn upload(title: Option<&str>) -> Self {
        Self::info(title.unwrap_or("Video uploaded"), "Your video is ready for editing")
    }

    pub fn processing() -> Self {
        Self::info("Processing video", "Your video is being processed with AI")
    }

    pub fn edit_complete() -> Self {
        Self::info("Edit complete", "Your video has been processed with AI")
    }

    /// Processing failed; `message` replaces the generic description.
    pub fn error(message: Option<&str>) -> Self {
        Self {
            title: "Processing failed".to_string(),
            description: message
                .unwrap_or("There was an error processing your video")
                .to_string(),
            variant: NoticeVariant::Destructive,
        }
    }

    pub fn save() -> Self {
        Self::info("Video saved", "Your edited video has been saved to your library")
    }

    pub fn share() -> Self {
        Self::info("Video shared", "Your video link has been copied to clipboard")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_title_override() {
        assert_eq!(Notice::upload(None).title, "Video uploaded");
        assert_eq!(Notice::upload(Some("Video recorded")).title, "Video recorded");
    }

    #[test]
    fn error_notice_is_destructive_with_fallback_text() {
        let generic = Notice::error(None);
        assert_eq!(generic.variant, NoticeVariant::Destructive);
        assert_eq!(generic.description, "There was an error processing your video");

        let specific = Notice::error(Some("quota exceeded"));
        assert_eq!(specific.description, "quota exceeded");
    }

    #[test]
    fn variant_serializes_snake_case() {
        let json = serde_json::to_value(Notice::edit_complete()).unwrap();
        assert_eq!(json["variant"], "default");
    }
}
