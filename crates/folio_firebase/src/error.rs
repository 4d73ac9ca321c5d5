use folio_common::FolioError;
use thiserror::Error;

/// Errors that can occur when reading Remote Config
#[derive(Error, Debug)]
pub enum RemoteConfigError {
    /// Error while obtaining an OAuth2 token
    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("HTTP request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Missing required configuration
    #[error("Missing configuration: {0}")]
    ConfigError(String),

    /// Non-success response from the Remote Config API
    #[error("Remote Config API error ({status}): {body}")]
    ApiError { status: u16, body: String },

    /// The parameter exists but is not a boolean
    #[error("Parameter {key} is not a boolean: {value}")]
    InvalidValue { key: String, value: String },
}

impl From<RemoteConfigError> for FolioError {
    fn from(err: RemoteConfigError) -> Self {
        FolioError::Internal(err.to_string())
    }
}
