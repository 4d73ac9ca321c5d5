//! Error types for the storage layer

use folio_common::FolioError;
use thiserror::Error;

/// Errors that can occur when reading or writing documents
#[derive(Debug, Error)]
pub enum DbError {
    /// Error from SQLx
    #[error("Database error: {0}")]
    SqlxError(#[from] sqlx::Error),

    /// Error with the database configuration
    #[error("Database configuration error: {0}")]
    ConfigError(String),

    /// Error with database URL parsing
    #[error("Database URL error: {0}")]
    UrlError(String),

    /// Error with database pool creation
    #[error("Database pool error: {0}")]
    PoolError(String),

    /// Error with database query
    #[error("Database query error: {0}")]
    QueryError(String),

    /// A stored row could not be turned back into a document
    #[error("Corrupt row: {0}")]
    DecodeError(String),

    /// The write would overlap an existing booking
    #[error("slot already booked")]
    Conflict,

    #[error("{0} not found")]
    NotFound(String),
}

impl From<DbError> for FolioError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Conflict => FolioError::Conflict(err.to_string()),
            DbError::NotFound(_) => FolioError::NotFound(err.to_string()),
            other => FolioError::Internal(other.to_string()),
        }
    }
}
