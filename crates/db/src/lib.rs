//! Persistence for landing page content and operator accounts.
//!
//! - [`repositories`] -- zero-sized repos with async queries over `&PgPool`.
//! - [`store`] -- the [`ContentStore`] / [`OperatorStore`] traits the API
//!   consumes, with PostgreSQL and in-memory implementations.

pub mod error;
pub mod models;
pub mod repositories;
pub mod store;

use sqlx::postgres::PgPoolOptions;

pub use error::StoreError;
pub use store::memory::{MemoryContentStore, MemoryOperatorStore};
pub use store::postgres::{PgContentStore, PgOperatorStore};
pub use store::{ContentStore, OperatorStore};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations in `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
