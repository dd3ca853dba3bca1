//! Repository for the `users` table.

use promptcut_core::user::User;
use sqlx::PgPool;

use crate::models::user::UserRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, email, password_hash, profile_picture, created_date";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the stored row.
    pub async fn create(pool: &PgPool, user: &User) -> Result<UserRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (id, username, email, password_hash, profile_picture, created_date)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserRow>(&query)
            .bind(&user.id)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.profile_picture)
            .bind(user.created_date)
            .fetch_one(pool)
            .await
    }

    /// Find a user by (already normalized) email.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<UserRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, UserRow>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by id.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<UserRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, UserRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
