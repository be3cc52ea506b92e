//! Persistence layer: row models, store ports, and their adapters.
//!
//! - [`store`] -- the port traits the workflow layer depends on.
//! - [`repositories`] -- zero-sized Postgres repositories plus [`PgStore`],
//!   the adapter that implements every port on top of a pool.
//! - `memory` (feature `memory`) -- an in-memory store for tests.

use sqlx::postgres::PgPoolOptions;

pub mod error;
#[cfg(feature = "memory")]
pub mod memory;
pub mod models;
pub mod repositories;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use repositories::PgStore;
pub use store::Store;

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
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await
        .map(|_| ())
}

/// Apply pending migrations from `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
