//! PostgreSQL adapters - Database implementations for the directory and
//! review store ports.
//!
//! - `PostgresDirectory` - teams and people, also the `TeamRegistry`
//! - `PostgresReviewStore` - review requests and their assignments
//!
//! Schema lives in `migrations/` and is applied by [`run_migrations`].

mod directory;
mod review_store;

pub use directory::PostgresDirectory;
pub use review_store::PostgresReviewStore;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseConfig;
use crate::domain::foundation::DomainError;

/// Pause between initial connection attempts.
const CONNECT_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Opens the connection pool, retrying while the database comes up.
///
/// Tries `connect_attempts` times, [`CONNECT_RETRY_DELAY`] apart, and
/// returns the last error if none succeeds.
pub async fn connect_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let options = PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .idle_timeout(config.idle_timeout())
        .max_lifetime(config.max_lifetime());

    let mut attempt = 1;
    loop {
        match options.clone().connect(config.url.expose_secret()).await {
            Ok(pool) => {
                tracing::info!(attempt, "database pool ready");
                return Ok(pool);
            }
            Err(e) if attempt < config.connect_attempts => {
                tracing::warn!(
                    attempt,
                    max_attempts = config.connect_attempts,
                    error = %e,
                    "database not reachable, retrying"
                );
                tokio::time::sleep(CONNECT_RETRY_DELAY).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Applies pending schema migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

fn query_failed(what: &str, e: sqlx::Error) -> DomainError {
    DomainError::database(format!("Failed to {}: {}", what, e))
}

fn corrupt_row(column: &str, e: impl std::fmt::Display) -> DomainError {
    DomainError::database(format!("Invalid value in column {}: {}", column, e))
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}
