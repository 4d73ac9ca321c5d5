//! Database client for Folio
//!
//! A thin wrapper around a `sqlx::Any` pool. Only SQLite URLs are accepted:
//! the booking insert relies on SQLite serializing writers to keep the
//! overlap check and the insert atomic.

use crate::error::DbError;
use folio_config::DatabaseConfig;
use sqlx::pool::PoolOptions;
use sqlx::Pool;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, error, info};

#[derive(Debug, Clone)]
pub struct DbClient {
    pool: Pool<sqlx::Any>,
}

impl DbClient {
    /// Connect using the `[database]` config section.
    ///
    /// # Errors
    ///
    /// Fails when the URL is empty or the pool cannot connect.
    pub async fn from_config(db_config: &DatabaseConfig) -> Result<Self, DbError> {
        if db_config.url.is_empty() {
            return Err(DbError::ConfigError("Database URL is empty".to_string()));
        }
        Self::from_url(&db_config.url).await
    }

    pub async fn from_url(db_url: &str) -> Result<Self, DbError> {
        if db_url.is_empty() {
            return Err(DbError::UrlError("Database URL is empty".to_string()));
        }
        if !db_url.starts_with("sqlite:") {
            return Err(DbError::UrlError(format!(
                "unsupported database backend in '{}', expected a sqlite: URL",
                db_url
            )));
        }

        let pool = Self::create_pool(db_url).await?;
        Ok(Self { pool })
    }

    async fn create_pool(db_url: &str) -> Result<Pool<sqlx::Any>, DbError> {
        debug!("Creating database pool with URL: {}", db_url);

        sqlx::any::install_default_drivers();

        let pool_options = PoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .idle_timeout(Duration::from_secs(600));

        // AnyConnectOptions has no create_if_missing, so make the file ourselves.
        if let Some(db_path) = sqlite_file_path(db_url) {
            if let Some(dir) = Path::new(db_path).parent() {
                if !dir.as_os_str().is_empty() && !dir.exists() {
                    debug!("Creating directory for SQLite database: {:?}", dir);
                    std::fs::create_dir_all(dir).map_err(|e| {
                        error!("Failed to create directory for SQLite database: {}", e);
                        DbError::PoolError(format!("Failed to create directory: {}", e))
                    })?;
                }
            }

            if !Path::new(db_path).exists() {
                debug!("Creating empty SQLite database file: {}", db_path);
                std::fs::File::create(db_path).map_err(|e| {
                    error!("Failed to create SQLite database file: {}", e);
                    DbError::PoolError(format!("Failed to create database file: {}", e))
                })?;
            }
        }

        let options = sqlx::any::AnyConnectOptions::from_str(db_url)
            .map_err(|e| DbError::UrlError(e.to_string()))?;

        let pool = pool_options.connect_with(options).await.map_err(|e| {
            error!("Failed to create database pool: {}", e);
            DbError::PoolError(e.to_string())
        })?;

        info!("Database pool created successfully");
        Ok(pool)
    }

    pub fn pool(&self) -> &Pool<sqlx::Any> {
        &self.pool
    }

    /// Execute a statement that returns no rows, yielding the affected row count.
    pub async fn execute(&self, query: &str) -> Result<u64, DbError> {
        sqlx::query(query)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected())
            .map_err(|e| DbError::QueryError(e.to_string()))
    }

    pub async fn is_healthy(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

/// File path of a file-backed SQLite URL, `None` for in-memory or other
/// backends. Handles both `sqlite:x.db` and `sqlite://x.db`.
fn sqlite_file_path(db_url: &str) -> Option<&str> {
    let rest = db_url
        .strip_prefix("sqlite://")
        .or_else(|| db_url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or(rest);
    if path.is_empty() || path.contains(":memory:") {
        None
    } else {
        Some(path)
    }
}

impl std::fmt::Display for DbClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DbClient")
    }
}

#[cfg(test)]
mod tests {
    use super::{sqlite_file_path, DbClient};
    use crate::error::DbError;

    #[test]
    fn sqlite_paths_are_extracted() {
        assert_eq!(sqlite_file_path("sqlite:data/folio.db"), Some("data/folio.db"));
        assert_eq!(sqlite_file_path("sqlite://folio.db?mode=rwc"), Some("folio.db"));
        assert_eq!(sqlite_file_path("sqlite::memory:"), None);
        assert_eq!(sqlite_file_path("postgres://localhost/folio"), None);
    }

    #[tokio::test]
    async fn non_sqlite_urls_are_rejected() {
        let result = DbClient::from_url("postgres://localhost/folio").await;
        assert!(matches!(result, Err(DbError::UrlError(_))));
    }
}
