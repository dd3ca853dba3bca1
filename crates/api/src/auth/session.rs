//! In-memory session registry.
//!
//! A login hands the client an opaque bearer token. Only its SHA-256 digest
//! is kept as the map key, so a dump of the store cannot be replayed.
//! Sessions end at logout or when their TTL passes.

use std::collections::HashMap;

use chrono::{Duration, Utc};
use promptcut_core::session::Session;
use promptcut_core::user::User;
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;
use uuid::Uuid;

pub struct SessionStore {
    sessions: RwLock<HashMap<String, Session>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Open a session for `user`. Returns the plaintext token and the session.
    pub async fn open(&self, user: &User) -> (String, Session) {
        let token = generate_token();
        let session = Session::open(user, Utc::now(), self.ttl);
        self.sessions
            .write()
            .await
            .insert(hash_token(&token), session.clone());
        (token, session)
    }

    /// Look up a live session. Expired sessions are dropped on access.
    pub async fn resolve(&self, token: &str) -> Option<Session> {
        let key = hash_token(token);
        let session = self.sessions.read().await.get(&key).cloned()?;
        if session.is_expired(Utc::now()) {
            self.sessions.write().await.remove(&key);
            return None;
        }
        Some(session)
    }

    /// End the session for `token`. Returns `false` if there was none.
    pub async fn close(&self, token: &str) -> bool {
        self.sessions
            .write()
            .await
            .remove(&hash_token(token))
            .is_some()
    }

    /// Drop every expired session; returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired(now));
        before - sessions.len()
    }
}

/// Two random v4 UUIDs, hex encoded.
fn generate_token() -> String {
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}

/// SHA-256 hex digest of a session token.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}
