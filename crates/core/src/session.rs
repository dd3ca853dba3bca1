//! Authenticated sessions.
//!
//! A [`Session`] is created at login, dropped at logout, and handed to
//! every operation that acts on behalf of a user. There is no ambient
//! "current user"; code that needs one receives the session explicitly.

use chrono::Duration;
use serde::Serialize;

use crate::types::{EntityId, Timestamp};
use crate::user::User;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    pub user_id: EntityId,
    pub username: String,
    pub email: String,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
}

impl Session {
    /// Open a session for `user` that lives for `ttl` from `now`.
    pub fn open(user: &User, now: Timestamp, ttl: Duration) -> Self {
        Self {
            user_id: user.id.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            created_at: now,
            expires_at: now + ttl,
        }
    }

    pub fn is_expired(&self, now: Timestamp) -> bool {
        now >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::user::NewUser;

    #[test]
    fn session_expires_after_ttl() {
        let user = User::from_new(NewUser {
            username: "demo".into(),
            email: "demo@example.com".into(),
            password_hash: String::new(),
        });
        let now = Utc::now();
        let session = Session::open(&user, now, Duration::minutes(30));

        assert_eq!(session.user_id, user.id);
        assert!(!session.is_expired(now + Duration::minutes(29)));
        assert!(session.is_expired(now + Duration::minutes(30)));
    }
}
