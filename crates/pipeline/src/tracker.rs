//! Registry of edit requests that are currently running.
//!
//! Each registered request owns a [`CancellationToken`] that is a child of
//! the tracker's root token, so cancelling one request leaves the others
//! running while [`InFlightTracker::cancel_all`] stops everything.

use std::collections::HashMap;

use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use crate::config::InFlightPolicy;
use crate::error::WorkflowError;

struct InFlight {
    video_id: String,
    cancel: CancellationToken,
}

pub struct InFlightTracker {
    /// Running requests indexed by edit request id.
    entries: RwLock<HashMap<String, InFlight>>,
    /// Parent of every per-request token. Cancelled on shutdown.
    root: CancellationToken,
}

impl InFlightTracker {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            root: CancellationToken::new(),
        }
    }

    /// Register `edit_id` as running against `video_id`.
    ///
    /// Under [`InFlightPolicy::ExclusivePerVideo`] the check and the insert
    /// happen under one write lock, so two concurrent submissions for the
    /// same video cannot both succeed.
    pub async fn register(
        &self,
        edit_id: &str,
        video_id: &str,
        policy: InFlightPolicy,
    ) -> Result<CancellationToken, WorkflowError> {
        if self.root.is_cancelled() {
            return Err(WorkflowError::Cancelled);
        }

        let mut entries = self.entries.write().await;
        if policy == InFlightPolicy::ExclusivePerVideo
            && entries.values().any(|e| e.video_id == video_id)
        {
            return Err(WorkflowError::VideoBusy {
                video_id: video_id.to_string(),
            });
        }

        let cancel = self.root.child_token();
        entries.insert(
            edit_id.to_string(),
            InFlight {
                video_id: video_id.to_string(),
                cancel: cancel.clone(),
            },
        );
        Ok(cancel)
    }

    /// Token for a registered request, or `None` once it has finished.
    pub async fn token(&self, edit_id: &str) -> Option<CancellationToken> {
        self.entries
            .read()
            .await
            .get(edit_id)
            .map(|e| e.cancel.clone())
    }

    /// A token tied to shutdown only, for requests run without registration.
    pub fn detached_token(&self) -> CancellationToken {
        self.root.child_token()
    }

    pub async fn release(&self, edit_id: &str) {
        self.entries.write().await.remove(edit_id);
    }

    /// Cancel one running request. Returns `false` if it is not running.
    pub async fn cancel(&self, edit_id: &str) -> bool {
        match self.entries.read().await.get(edit_id) {
            Some(entry) => {
                entry.cancel.cancel();
                true
            }
            None => false,
        }
    }

    /// Cancel every running request and refuse new registrations.
    pub fn cancel_all(&self) {
        self.root.cancel();
    }

    /// Ids of the requests running against `video_id`.
    pub async fn in_flight(&self, video_id: &str) -> Vec<String> {
        self.entries
            .read()
            .await
            .iter()
            .filter(|(_, e)| e.video_id == video_id)
            .map(|(id, _)| id.clone())
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

impl Default for InFlightTracker {
    fn default() -> Self {
        Self::new()
    }
}
