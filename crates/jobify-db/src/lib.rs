//! # Jobify DB
//!
//! Connection pool, migrations and the storage layer of the Jobify API.
//!
//! Handlers never talk to the database directly; they go through the
//! [`UserStore`] and [`JobStore`] traits. [`postgres`] implements them on a
//! [`PgPool`]; [`memory`] (behind the `test-utils` feature) implements them
//! in process for tests.
//!
//! # Example
//!
//! ```ignore
//! use jobify_config::DatabaseConfig;
//! use jobify_db::{init_db_pool, run_migrations, PgUserStore};
//!
//! let pool = init_db_pool(&DatabaseConfig::from_env()?).await?;
//! run_migrations(&pool).await?;
//! let users = PgUserStore::new(pool.clone());
//! ```

use std::time::Duration;

use jobify_config::DatabaseConfig;
use sqlx::postgres::PgPoolOptions;

#[cfg(any(test, feature = "test-utils"))]
pub mod memory;
pub mod postgres;
pub mod store;

pub use postgres::{PgJobStore, PgUserStore};
pub use store::{JobStore, UserStore};

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Connects a PostgreSQL pool sized from `config`.
///
/// # Errors
///
/// Returns the connection error if the database is unreachable or the URL is
/// invalid. Callers at startup treat this as fatal.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&config.url)
        .await
}

/// Applies the embedded migrations from `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}
