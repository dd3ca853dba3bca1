//! Repository for the `edit_requests` table.

use promptcut_core::edit_request::{EditRequest, EditRequestStatus};
use sqlx::PgPool;

use crate::models::edit_request::EditRequestRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, video_id, user_id, prompt_text, response_json, created_date, status";

/// Provides CRUD operations for edit requests.
pub struct EditRequestRepo;

impl EditRequestRepo {
    /// Insert a new edit request.
    pub async fn create(pool: &PgPool, request: &EditRequest) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO edit_requests
                (id, video_id, user_id, prompt_text, response_json, created_date, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(&request.id)
        .bind(&request.video_id)
        .bind(&request.user_id)
        .bind(&request.prompt_text)
        .bind(&request.response_json)
        .bind(request.created_date)
        .bind(request.status.label())
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Write the status and plan of a request that is still in progress.
    ///
    /// Rows that already hold a terminal status are left untouched; the
    /// return value is `true` only if a row was updated.
    pub async fn update_in_progress(
        pool: &PgPool,
        request: &EditRequest,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE edit_requests SET status = $2, response_json = $3
             WHERE id = $1 AND status = $4",
        )
        .bind(&request.id)
        .bind(request.status.label())
        .bind(&request.response_json)
        .bind(EditRequestStatus::InProgress.label())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Find an edit request by id.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<EditRequestRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM edit_requests WHERE id = $1");
        sqlx::query_as::<_, EditRequestRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the requests for a video, oldest first.
    pub async fn list_for_video(
        pool: &PgPool,
        video_id: &str,
    ) -> Result<Vec<EditRequestRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM edit_requests
             WHERE video_id = $1
             ORDER BY created_date ASC, id ASC"
        );
        sqlx::query_as::<_, EditRequestRow>(&query)
            .bind(video_id)
            .fetch_all(pool)
            .await
    }
}
