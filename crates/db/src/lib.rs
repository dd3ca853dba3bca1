//! Storage for users, videos and edit requests.
//!
//! Two backends implement the `promptcut_core::repository` traits:
//!
//! - [`PgStore`] -- PostgreSQL via sqlx, built on the zero-sized
//!   repositories in [`repositories`].
//! - [`MemoryStore`] -- process-local maps, used when no database is
//!   configured and throughout the test suites.

use sqlx::postgres::PgPoolOptions;

pub mod error;
pub mod memory;
pub mod models;
pub mod pg_store;
pub mod repositories;

pub use memory::MemoryStore;
pub use pg_store::PgStore;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the pool can reach the server.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply any pending migrations from `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
