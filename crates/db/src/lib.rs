//! Persistence layer for Vitalwatch.
//!
//! Exposes the [`PatientStore`] boundary trait plus two
//! implementations: [`PgPatientStore`] (PostgreSQL via sqlx) and
//! [`MemoryPatientStore`] (in-process, used by tests and when the
//! server runs without a database).

pub mod memory;
pub mod models;
pub mod repositories;
pub mod store;

pub use memory::MemoryPatientStore;
pub use store::{PatientStore, PgPatientStore, StoreError};

use sqlx::postgres::PgPoolOptions;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Verify the database is reachable with a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await?;
    Ok(())
}

/// Apply all pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
