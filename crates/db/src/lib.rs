//! SQLite persistence for help-desk tickets.
//!
//! Exposes the pool type, connection/migration helpers, row models and the
//! [`repositories::TicketRepo`] used by the API handlers.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::SqlitePool;

/// Connection string for an ephemeral, process-local database.
pub const IN_MEMORY_URL: &str = "sqlite::memory:";

/// Create a connection pool from a database URL.
///
/// In-memory databases live and die with a single connection, so they get a
/// pool of exactly one connection that is never recycled. File databases
/// are created on first connect.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let in_memory = is_in_memory(database_url);
    tracing::debug!(in_memory, "Opening SQLite connection pool");

    if in_memory {
        return SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(options)
            .await;
    }

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply embedded migrations, creating the `tickets` table if absent.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}
