//! Data service for Rollcall.
//!
//! Handlers never talk to Postgres directly: they hold an
//! `Arc<dyn DataService>` built once at startup. [`PgDataService`] is the
//! production implementation over the `sqlx` repositories; with the `memory`
//! feature, [`memory::MemoryDataService`] provides the same semantics without a
//! database.

use sqlx::postgres::PgPoolOptions;

pub mod error;
#[cfg(any(test, feature = "memory"))]
pub mod memory;
pub mod models;
pub mod pg;
pub mod repositories;
pub mod service;

pub use error::{DbError, DbResult};
pub use pg::PgDataService;
pub use service::DataService;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
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
