//! Per-user, per-video prompt history.
//!
//! Each prompt a user submits against a video is appended here and the
//! accumulated history is sent to the planner as conversation context on
//! the next submission. History lives only as long as the process.

use std::collections::HashMap;

use promptcut_core::prompt::{PromptEntry, PromptHistory};
use tokio::sync::RwLock;

#[derive(Default)]
pub struct PromptLog {
    /// Keyed by `(user_id, video_id)`.
    histories: RwLock<HashMap<(String, String), PromptHistory>>,
}

impl PromptLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current history, oldest first.
    pub async fn snapshot(&self, user_id: &str, video_id: &str) -> Vec<PromptEntry> {
        self.histories
            .read()
            .await
            .get(&key(user_id, video_id))
            .map(PromptHistory::snapshot)
            .unwrap_or_default()
    }

    pub async fn append(&self, user_id: &str, video_id: &str, entry: PromptEntry) {
        self.histories
            .write()
            .await
            .entry(key(user_id, video_id))
            .or_default()
            .push(entry);
    }

    pub async fn clear(&self, user_id: &str, video_id: &str) {
        self.histories.write().await.remove(&key(user_id, video_id));
    }
}

fn key(user_id: &str, video_id: &str) -> (String, String) {
    (user_id.to_string(), video_id.to_string())
}
