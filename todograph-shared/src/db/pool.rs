/// Database connection pool management
///
/// Creates the PostgreSQL connection pool used by the Postgres stores and
/// verifies connectivity before handing it out, so a misconfigured
/// DATABASE_URL fails at startup instead of on the first request.

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::info;

/// Configuration for the database connection pool
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Timeout for acquiring a connection from the pool (seconds)
    pub connect_timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 10,
            connect_timeout_seconds: 30,
        }
    }
}

/// Creates and health-checks a PostgreSQL connection pool
///
/// # Errors
///
/// Returns an error if the URL is invalid, the database is unreachable,
/// or the health-check query fails.
pub async fn create_pool(config: DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
        .connect(&config.url)
        .await?;

    // Fail fast if the database is not actually reachable
    sqlx::query("SELECT 1").execute(&pool).await?;

    info!(
        max_connections = config.max_connections,
        "database pool ready"
    );

    Ok(pool)
}
