//! `edit_requests` rows.

use promptcut_core::edit_request::{EditRequest, EditRequestStatus};
use promptcut_core::error::CoreError;
use promptcut_core::types::Timestamp;
use sqlx::FromRow;

/// A row from the `edit_requests` table.
#[derive(Debug, Clone, FromRow)]
pub struct EditRequestRow {
    pub id: String,
    pub video_id: String,
    pub user_id: String,
    pub prompt_text: String,
    pub response_json: Option<String>,
    pub created_date: Timestamp,
    pub status: String,
}

impl TryFrom<EditRequestRow> for EditRequest {
    type Error = CoreError;

    fn try_from(row: EditRequestRow) -> Result<Self, Self::Error> {
        Ok(Self {
            status: EditRequestStatus::from_label(&row.status)?,
            id: row.id,
            video_id: row.video_id,
            user_id: row.user_id,
            prompt_text: row.prompt_text,
            response_json: row.response_json,
            created_date: row.created_date,
        })
    }
}
