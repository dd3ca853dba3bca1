//! `videos` rows.

use promptcut_core::error::CoreError;
use promptcut_core::types::Timestamp;
use promptcut_core::video::{Video, VideoStatus};
use sqlx::FromRow;

/// A row from the `videos` table.
#[derive(Debug, Clone, FromRow)]
pub struct VideoRow {
    pub id: String,
    pub owner_id: String,
    pub original_video_file: String,
    pub edited_video_file: Option<String>,
    pub video_title: String,
    pub video_description: Option<String>,
    pub created_date: Timestamp,
    pub status: String,
}

impl TryFrom<VideoRow> for Video {
    type Error = CoreError;

    fn try_from(row: VideoRow) -> Result<Self, Self::Error> {
        Ok(Self {
            status: VideoStatus::from_label(&row.status)?,
            id: row.id,
            owner_id: row.owner_id,
            original_video_file: row.original_video_file,
            edited_video_file: row.edited_video_file,
            video_title: row.video_title,
            video_description: row.video_description,
            created_date: row.created_date,
        })
    }
}
