//! PostgreSQL implementation of the repository traits.

use async_trait::async_trait;
use promptcut_core::edit_request::EditRequest;
use promptcut_core::error::CoreError;
use promptcut_core::repository::{EditRequestStore, UserRepository, VideoRepository};
use promptcut_core::user::{normalize_email, NewUser, User};
use promptcut_core::video::{NewVideo, Video};

use crate::error::map_sqlx_error;
use crate::repositories::{EditRequestRepo, UserRepo, VideoRepo};
use crate::DbPool;

/// Adapts the zero-sized repositories to the core traits over a shared pool.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl VideoRepository for PgStore {
    async fn get_by_id(&self, id: &str) -> Result<Option<Video>, CoreError> {
        VideoRepo::find_by_id(&self.pool, id)
            .await
            .map_err(map_sqlx_error)?
            .map(Video::try_from)
            .transpose()
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Video>, CoreError> {
        VideoRepo::list_by_owner(&self.pool, owner_id)
            .await
            .map_err(map_sqlx_error)?
            .into_iter()
            .map(Video::try_from)
            .collect()
    }

    async fn create(&self, owner_id: &str, input: NewVideo) -> Result<Video, CoreError> {
        let video = Video::from_new(owner_id, input);
        VideoRepo::create(&self.pool, &video)
            .await
            .map_err(map_sqlx_error)?
            .try_into()
    }

    async fn set_edited_file(&self, id: &str, uri: &str) -> Result<Video, CoreError> {
        VideoRepo::set_edited_file(&self.pool, id, uri)
            .await
            .map_err(map_sqlx_error)?
            .ok_or_else(|| CoreError::not_found("Video", id))?
            .try_into()
    }
}

#[async_trait]
impl EditRequestStore for PgStore {
    async fn insert(&self, request: &EditRequest) -> Result<(), CoreError> {
        EditRequestRepo::create(&self.pool, request)
            .await
            .map_err(map_sqlx_error)
    }

    async fn update(&self, request: &EditRequest) -> Result<(), CoreError> {
        let updated = EditRequestRepo::update_in_progress(&self.pool, request)
            .await
            .map_err(map_sqlx_error)?;
        if updated {
            return Ok(());
        }

        match EditRequestRepo::find_by_id(&self.pool, &request.id)
            .await
            .map_err(map_sqlx_error)?
        {
            None => Err(CoreError::not_found("EditRequest", request.id.as_str())),
            Some(row) => Err(CoreError::Conflict(format!(
                "Edit request {} is already {}",
                row.id, row.status
            ))),
        }
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<EditRequest>, CoreError> {
        EditRequestRepo::find_by_id(&self.pool, id)
            .await
            .map_err(map_sqlx_error)?
            .map(EditRequest::try_from)
            .transpose()
    }

    async fn list_for_video(&self, video_id: &str) -> Result<Vec<EditRequest>, CoreError> {
        EditRequestRepo::list_for_video(&self.pool, video_id)
            .await
            .map_err(map_sqlx_error)?
            .into_iter()
            .map(EditRequest::try_from)
            .collect()
    }
}

#[async_trait]
impl UserRepository for PgStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, CoreError> {
        let row = UserRepo::find_by_email(&self.pool, &normalize_email(email))
            .await
            .map_err(map_sqlx_error)?;
        Ok(row.map(User::from))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, CoreError> {
        let row = UserRepo::find_by_id(&self.pool, id)
            .await
            .map_err(map_sqlx_error)?;
        Ok(row.map(User::from))
    }

    async fn create(&self, input: NewUser) -> Result<User, CoreError> {
        let user = User::from_new(input);
        let row = UserRepo::create(&self.pool, &user)
            .await
            .map_err(map_sqlx_error)?;
        Ok(row.into())
    }
}
