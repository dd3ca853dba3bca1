//! `users` rows.

use promptcut_core::types::Timestamp;
use promptcut_core::user::User;
use sqlx::FromRow;

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub profile_picture: Option<String>,
    pub created_date: Timestamp,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            email: row.email,
            password_hash: row.password_hash,
            profile_picture: row.profile_picture,
            created_date: row.created_date,
        }
    }
}
