//! Database connection pool management

use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::time::Duration;

use crate::{
    config::DatabaseConfig,
    error::{sanitize_connection_url, Error, Result},
    repository::{RepositoryError, RepositoryOperation},
};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS films (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT,
    year INTEGER NOT NULL DEFAULT 0,
    director TEXT,
    stars TEXT,
    review TEXT
)";

/// Create a SQLite connection pool with retry logic
///
/// Retries use exponential backoff starting at `retry_delay_secs`.
pub async fn create_pool(config: &DatabaseConfig) -> Result<SqlitePool> {
    let mut attempt = 0;
    let base_delay = Duration::from_secs(config.retry_delay_secs);

    loop {
        match try_create_pool(config).await {
            Ok(pool) => {
                if attempt > 0 {
                    tracing::info!(
                        "Database connection established after {} attempt(s)",
                        attempt + 1
                    );
                } else {
                    tracing::info!(
                        url = %sanitize_connection_url(&config.url),
                        "Database connection pool created: max={}, min={}",
                        config.max_connections,
                        config.min_connections
                    );
                }
                return Ok(pool);
            }
            Err(e) => {
                attempt += 1;

                if attempt > config.max_retries {
                    tracing::error!(
                        "Failed to connect to database after {} attempts: {}",
                        config.max_retries + 1,
                        e
                    );
                    return Err(e);
                }

                let delay = base_delay * 2_u32.pow(attempt.saturating_sub(1));

                tracing::warn!(
                    "Database connection attempt {} failed: {}. Retrying in {:?}...",
                    attempt,
                    e,
                    delay
                );

                tokio::time::sleep(delay).await;
            }
        }
    }
}

/// Attempt to create a database pool (single try)
async fn try_create_pool(config: &DatabaseConfig) -> Result<SqlitePool> {
    let options = if config.is_in_memory() {
        // The database lives only as long as its single connection
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
    };

    options
        .acquire_timeout(Duration::from_secs(config.connection_timeout_secs))
        .connect(&config.url)
        .await
        .map_err(|e| {
            Error::Internal(format!(
                "Failed to open database at '{}': {}\n\n\
                Troubleshooting:\n\
                1. Check the URL format: sqlite://path/to/films.db?mode=rwc\n\
                2. Verify the directory exists and is writable\n\
                3. Make sure no other process holds an exclusive lock\n\n\
                Original error: {}",
                sanitize_connection_url(&config.url),
                categorize_db_error(&e),
                e
            ))
        })
}

/// Create the `films` table if it does not exist
pub async fn migrate(pool: &SqlitePool) -> Result<()> {
    sqlx::query(SCHEMA)
        .execute(pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(RepositoryOperation::Migrate, e))?;

    tracing::debug!("films schema ready");
    Ok(())
}

/// Connect and create the schema
pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool> {
    let pool = create_pool(config).await?;
    migrate(&pool).await?;
    Ok(pool)
}

/// Categorize database error for better user guidance
fn categorize_db_error(err: &sqlx::Error) -> &'static str {
    use sqlx::Error;
    match err {
        Error::Configuration(_) => "Configuration error",
        Error::Database(_) => "Database error - check file permissions",
        Error::Io(_) => "I/O error - check the database path",
        Error::PoolTimedOut => "Connection pool timeout - database may be locked",
        Error::PoolClosed => "Connection pool closed",
        Error::WorkerCrashed => "Database worker crashed",
        _ => "Connection error",
    }
}

/// Fresh in-memory database with the schema applied
#[cfg(test)]
pub(crate) async fn memory_pool() -> Result<SqlitePool> {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_retries: 0,
        ..DatabaseConfig::default()
    };
    connect(&config).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_pool_has_schema() {
        let pool = memory_pool().await.unwrap();
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM films")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count.0, 0);
    }

    #[tokio::test]
    async fn test_migrate_is_idempotent() {
        let pool = memory_pool().await.unwrap();
        migrate(&pool).await.unwrap();
    }

    #[tokio::test]
    async fn test_bad_url_fails_without_retry() {
        let config = DatabaseConfig {
            url: "sqlite:///nonexistent-dir/films/films.db".to_string(),
            max_retries: 0,
            connection_timeout_secs: 1,
            ..DatabaseConfig::default()
        };
        let err = create_pool(&config).await.unwrap_err();
        assert!(matches!(err, Error::Internal(_)));
    }

    #[test]
    fn test_categorize() {
        assert_eq!(
            categorize_db_error(&sqlx::Error::PoolTimedOut),
            "Connection pool timeout - database may be locked"
        );
    }
}
