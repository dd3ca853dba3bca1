//! Process-local storage.
//!
//! [`MemoryStore`] keeps users, videos and edit requests in
//! `tokio::sync::RwLock`-guarded maps. It enforces the same rules as the
//! PostgreSQL backend (unique emails, no updates to finished edit
//! requests) and starts empty. Nothing survives a restart.

use std::collections::HashMap;

use async_trait::async_trait;
use promptcut_core::edit_request::EditRequest;
use promptcut_core::error::CoreError;
use promptcut_core::repository::{EditRequestStore, UserRepository, VideoRepository};
use promptcut_core::user::{normalize_email, NewUser, User};
use promptcut_core::video::{NewVideo, Video, VideoStatus};
use tokio::sync::RwLock;

#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<String, User>>,
    videos: RwLock<HashMap<String, Video>>,
    edit_requests: RwLock<HashMap<String, EditRequest>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VideoRepository for MemoryStore {
    async fn get_by_id(&self, id: &str) -> Result<Option<Video>, CoreError> {
        Ok(self.videos.read().await.get(id).cloned())
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Video>, CoreError> {
        let mut videos: Vec<Video> = self
            .videos
            .read()
            .await
            .values()
            .filter(|v| v.owner_id == owner_id)
            .cloned()
            .collect();
        videos.sort_by(|a, b| (b.created_date, &b.id).cmp(&(a.created_date, &a.id)));
        Ok(videos)
    }

    async fn create(&self, owner_id: &str, input: NewVideo) -> Result<Video, CoreError> {
        let video = Video::from_new(owner_id, input);
        self.videos
            .write()
            .await
            .insert(video.id.clone(), video.clone());
        Ok(video)
    }

    async fn set_edited_file(&self, id: &str, uri: &str) -> Result<Video, CoreError> {
        let mut videos = self.videos.write().await;
        let video = videos
            .get_mut(id)
            .ok_or_else(|| CoreError::not_found("Video", id))?;
        video.edited_video_file = Some(uri.to_string());
        video.status = VideoStatus::Ready;
        Ok(video.clone())
    }
}

#[async_trait]
impl EditRequestStore for MemoryStore {
    async fn insert(&self, request: &EditRequest) -> Result<(), CoreError> {
        let mut requests = self.edit_requests.write().await;
        if requests.contains_key(&request.id) {
            return Err(CoreError::Conflict(format!(
                "Edit request {} already exists",
                request.id
            )));
        }
        requests.insert(request.id.clone(), request.clone());
        Ok(())
    }

    async fn update(&self, request: &EditRequest) -> Result<(), CoreError> {
        let mut requests = self.edit_requests.write().await;
        let stored = requests
            .get_mut(&request.id)
            .ok_or_else(|| CoreError::not_found("EditRequest", request.id.as_str()))?;
        if stored.status.is_terminal() {
            return Err(CoreError::Conflict(format!(
                "Edit request {} is already {}",
                stored.id, stored.status
            )));
        }
        stored.status = request.status;
        stored.response_json = request.response_json.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<EditRequest>, CoreError> {
        Ok(self.edit_requests.read().await.get(id).cloned())
    }

    async fn list_for_video(&self, video_id: &str) -> Result<Vec<EditRequest>, CoreError> {
        let mut requests: Vec<EditRequest> = self
            .edit_requests
            .read()
            .await
            .values()
            .filter(|r| r.video_id == video_id)
            .cloned()
            .collect();
        requests.sort_by(|a, b| (a.created_date, &a.id).cmp(&(b.created_date, &b.id)));
        Ok(requests)
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, CoreError> {
        let email = normalize_email(email);
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, CoreError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn create(&self, input: NewUser) -> Result<User, CoreError> {
        let user = User::from_new(input);
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(CoreError::Conflict(format!(
                "A user with email {} already exists",
                user.email
            )));
        }
        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn new_video(title: &str) -> NewVideo {
        NewVideo {
            original_video_file: format!("https://cdn.example/{title}.mp4"),
            video_title: title.to_string(),
            video_description: None,
        }
    }

    fn new_user(email: &str) -> NewUser {
        NewUser {
            username: "demo".into(),
            email: email.into(),
            password_hash: "hash".into(),
        }
    }

    #[tokio::test]
    async fn list_by_owner_filters_and_orders_newest_first() {
        let store = MemoryStore::new();
        let first = VideoRepository::create(&store, "usr_a", new_video("first")).await.unwrap();
        let second = VideoRepository::create(&store, "usr_a", new_video("second")).await.unwrap();
        VideoRepository::create(&store, "usr_b", new_video("other")).await.unwrap();

        let listed = store.list_by_owner("usr_a").await.unwrap();
        let ids: Vec<_> = listed.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, [second.id.as_str(), first.id.as_str()]);
    }

    #[tokio::test]
    async fn set_edited_file_marks_ready() {
        let store = MemoryStore::new();
        let video = VideoRepository::create(&store, "usr_a", new_video("clip")).await.unwrap();

        let updated = store
            .set_edited_file(&video.id, "https://example/out.mp4")
            .await
            .unwrap();
        assert_eq!(updated.edited_video_file.as_deref(), Some("https://example/out.mp4"));
        assert_eq!(updated.status, VideoStatus::Ready);

        assert_matches!(
            store.set_edited_file("vid_missing", "x").await,
            Err(CoreError::NotFound { entity: "Video", .. })
        );
    }

    #[tokio::test]
    async fn edit_request_update_refuses_terminal_rows() {
        let store = MemoryStore::new();
        let mut request = EditRequest::new("vid_1", "usr_1", "Add a caption");
        store.insert(&request).await.unwrap();
        assert_matches!(store.insert(&request).await, Err(CoreError::Conflict(_)));

        request.fail().unwrap();
        store.update(&request).await.unwrap();

        let mut stale = request.clone();
        stale.status = promptcut_core::edit_request::EditRequestStatus::Completed;
        assert_matches!(store.update(&stale).await, Err(CoreError::Conflict(_)));

        let stored = EditRequestStore::find_by_id(&store, &request.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, promptcut_core::edit_request::EditRequestStatus::Error);
    }

    #[tokio::test]
    async fn list_for_video_orders_oldest_first() {
        let store = MemoryStore::new();
        let a = EditRequest::new("vid_1", "usr_1", "one");
        let b = EditRequest::new("vid_1", "usr_1", "two");
        let c = EditRequest::new("vid_2", "usr_1", "elsewhere");
        store.insert(&b).await.unwrap();
        store.insert(&a).await.unwrap();
        store.insert(&c).await.unwrap();

        let listed = store.list_for_video("vid_1").await.unwrap();
        let prompts: Vec<_> = listed.iter().map(|r| r.prompt_text.as_str()).collect();
        assert_eq!(prompts, ["one", "two"]);
    }

    #[tokio::test]
    async fn user_emails_are_unique_case_insensitively() {
        let store = MemoryStore::new();
        let user = UserRepository::create(&store, new_user("Demo@Example.com")).await.unwrap();

        assert_matches!(
            UserRepository::create(&store, new_user("demo@example.com ")).await,
            Err(CoreError::Conflict(_))
        );

        let found = store.find_by_email("DEMO@example.com").await.unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert!(UserRepository::find_by_id(&store, &user.id).await.unwrap().is_some());
    }
}
