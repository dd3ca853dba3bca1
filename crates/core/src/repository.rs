//! Storage seams.
//!
//! The workflow and the HTTP layer only talk to storage through these
//! traits. `promptcut-db` provides a PostgreSQL implementation and an
//! in-process one; both behave identically from the caller's side.

use async_trait::async_trait;

use crate::edit_request::EditRequest;
use crate::error::CoreError;
use crate::user::{NewUser, User};
use crate::video::{NewVideo, Video};

#[async_trait]
pub trait VideoRepository: Send + Sync {
    async fn get_by_id(&self, id: &str) -> Result<Option<Video>, CoreError>;

    /// All videos owned by `owner_id`, newest first.
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Video>, CoreError>;

    async fn create(&self, owner_id: &str, input: NewVideo) -> Result<Video, CoreError>;

    /// Record the processed file for a video and mark it `Ready`.
    async fn set_edited_file(&self, id: &str, uri: &str) -> Result<Video, CoreError>;
}

#[async_trait]
pub trait EditRequestStore: Send + Sync {
    /// Persist a new request.
    async fn insert(&self, request: &EditRequest) -> Result<(), CoreError>;

    /// Overwrite the mutable fields (`status`, `response_json`).
    async fn update(&self, request: &EditRequest) -> Result<(), CoreError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<EditRequest>, CoreError>;

    /// Requests for a video, oldest first.
    async fn list_for_video(&self, video_id: &str) -> Result<Vec<EditRequest>, CoreError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, CoreError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, CoreError>;

    /// Create a user. Fails with `Conflict` if the email is taken.
    async fn create(&self, input: NewUser) -> Result<User, CoreError>;
}
