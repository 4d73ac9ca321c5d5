use folio_common::FolioError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing session")]
    MissingSession,

    #[error("Session expired")]
    Expired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Admin access required")]
    NotAdmin,

    #[error("Failed to encode token: {0}")]
    EncodingError(String),
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
            _ => AuthError::InvalidToken(err.to_string()),
        }
    }
}

impl From<AuthError> for FolioError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::EncodingError(_) => FolioError::Internal(err.to_string()),
            AuthError::InvalidToken(_) => FolioError::Auth("Invalid token".to_string()),
            other => FolioError::Auth(other.to_string()),
        }
    }
}
