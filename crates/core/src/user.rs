//! Registered users.

use chrono::Utc;
use serde::Serialize;

use crate::types::{new_id, EntityId, Timestamp};

/// Prefix for generated user identifiers.
pub const USER_ID_PREFIX: &str = "usr";

/// A registered user.
///
/// **Note:** `password_hash` is never serialized to responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: EntityId,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub profile_picture: Option<String>,
    pub created_date: Timestamp,
}

/// Input for creating a user. The password must already be hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

impl User {
    pub fn from_new(input: NewUser) -> Self {
        Self {
            id: new_id(USER_ID_PREFIX),
            username: input.username,
            email: normalize_email(&input.email),
            password_hash: input.password_hash,
            profile_picture: None,
            created_date: Utc::now(),
        }
    }
}

/// Emails are compared case-insensitively and without surrounding whitespace.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
