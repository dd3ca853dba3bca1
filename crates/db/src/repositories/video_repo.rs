//! Repository for the `videos` table.

use promptcut_core::video::{Video, VideoStatus};
use sqlx::PgPool;

use crate::models::video::VideoRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, owner_id, original_video_file, edited_video_file, \
    video_title, video_description, created_date, status";

/// Provides CRUD operations for videos.
pub struct VideoRepo;

impl VideoRepo {
    /// Insert a new video, returning the stored row.
    pub async fn create(pool: &PgPool, video: &Video) -> Result<VideoRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO videos
                (id, owner_id, original_video_file, edited_video_file,
                 video_title, video_description, created_date, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, VideoRow>(&query)
            .bind(&video.id)
            .bind(&video.owner_id)
            .bind(&video.original_video_file)
            .bind(&video.edited_video_file)
            .bind(&video.video_title)
            .bind(&video.video_description)
            .bind(video.created_date)
            .bind(video.status.label())
            .fetch_one(pool)
            .await
    }

    /// Find a video by id.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<VideoRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM videos WHERE id = $1");
        sqlx::query_as::<_, VideoRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List videos for an owner, newest first.
    pub async fn list_by_owner(pool: &PgPool, owner_id: &str) -> Result<Vec<VideoRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM videos
             WHERE owner_id = $1
             ORDER BY created_date DESC, id DESC"
        );
        sqlx::query_as::<_, VideoRow>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Store the processed file URI and mark the video ready.
    ///
    /// Returns `None` if no video has the given id.
    pub async fn set_edited_file(
        pool: &PgPool,
        id: &str,
        uri: &str,
    ) -> Result<Option<VideoRow>, sqlx::Error> {
        let query = format!(
            "UPDATE videos SET edited_video_file = $2, status = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, VideoRow>(&query)
            .bind(id)
            .bind(uri)
            .bind(VideoStatus::Ready.label())
            .fetch_optional(pool)
            .await
    }
}
