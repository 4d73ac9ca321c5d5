// --- File: crates/folio_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The error every HTTP handler in the workspace ends up returning.
///
/// Crate specific errors (`DbError`, `BookingError`, ...) implement
/// `From<_> for FolioError` so handlers can use `?` throughout.
#[derive(Error, Debug)]
pub enum FolioError {
    /// Input did not pass validation. `field` names the offending input.
    #[error("invalid {field}: {message}")]
    Validation { field: String, message: String },

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Auth(String),

    /// An integration is switched off. Callers treat this as a soft failure.
    #[error("integration disabled: {0}")]
    IntegrationDisabled(String),

    #[error("{0}")]
    ServiceUnavailable(String),

    /// Anything unexpected. The detail is logged, never sent to clients.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Maps an error onto an HTTP status code.
pub trait HttpStatusCode {
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for FolioError {
    fn status_code(&self) -> u16 {
        match self {
            FolioError::Validation { .. } => 400,
            FolioError::Auth(_) => 401,
            FolioError::NotFound(_) => 404,
            FolioError::Conflict(_) => 409,
            FolioError::IntegrationDisabled(_) => 503,
            FolioError::ServiceUnavailable(_) => 503,
            FolioError::Internal(_) => 500,
        }
    }
}

impl FolioError {
    /// The message safe to show to API clients.
    pub fn public_message(&self) -> String {
        match self {
            FolioError::Internal(_) => "Internal server error".to_string(),
            FolioError::IntegrationDisabled(_) => "Service unavailable".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for FolioError {
    fn from(err: reqwest::Error) -> Self {
        FolioError::Internal(format!("HTTP request failed: {}", err))
    }
}

impl From<serde_json::Error> for FolioError {
    fn from(err: serde_json::Error) -> Self {
        FolioError::Internal(format!("JSON error: {}", err))
    }
}

pub fn validation_error<F: fmt::Display, M: fmt::Display>(field: F, message: M) -> FolioError {
    FolioError::Validation {
        field: field.to_string(),
        message: message.to_string(),
    }
}

pub fn not_found<T: fmt::Display>(message: T) -> FolioError {
    FolioError::NotFound(message.to_string())
}

pub fn conflict<T: fmt::Display>(message: T) -> FolioError {
    FolioError::Conflict(message.to_string())
}

pub fn service_unavailable<T: fmt::Display>(message: T) -> FolioError {
    FolioError::ServiceUnavailable(message.to_string())
}

pub fn internal_error<T: fmt::Display>(message: T) -> FolioError {
    FolioError::Internal(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_variants() {
        assert_eq!(validation_error("email", "bad").status_code(), 400);
        assert_eq!(FolioError::Auth("no session".into()).status_code(), 401);
        assert_eq!(not_found("booking").status_code(), 404);
        assert_eq!(conflict("slot already booked").status_code(), 409);
        assert_eq!(service_unavailable("closed").status_code(), 503);
        assert_eq!(internal_error("boom").status_code(), 500);
    }

    #[test]
    fn internal_detail_is_hidden() {
        let err = internal_error("database file is locked");
        assert_eq!(err.public_message(), "Internal server error");
        assert!(err.to_string().contains("locked"));
    }

    #[test]
    fn validation_message_names_field() {
        let err = validation_error("days", "must be between 1 and 60");
        assert_eq!(err.public_message(), "invalid days: must be between 1 and 60");
    }
}
