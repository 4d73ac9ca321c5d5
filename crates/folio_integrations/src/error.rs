use folio_common::FolioError;
use thiserror::Error;

/// Errors from the outbound integrations.
///
/// `Disabled` is the expected outcome for a switched-off integration and is
/// not treated as a failure by the notifier.
#[derive(Error, Debug)]
pub enum IntegrationError {
    #[error("{0} integration is disabled")]
    Disabled(&'static str),

    #[error("{name} call timed out after {seconds}s")]
    Timeout { name: &'static str, seconds: u64 },

    #[error("HTTP request error: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("{service} API error ({status}): {body}")]
    ApiError {
        service: &'static str,
        status: u16,
        body: String,
    },

    #[error("Google API error: {0}")]
    CalendarError(#[from] google_calendar3::Error),

    #[error("Missing configuration: {0}")]
    ConfigError(String),
}

impl IntegrationError {
    pub fn is_disabled(&self) -> bool {
        matches!(self, IntegrationError::Disabled(_))
    }
}

impl From<IntegrationError> for FolioError {
    fn from(err: IntegrationError) -> Self {
        match err {
            IntegrationError::Disabled(name) => FolioError::IntegrationDisabled(name.to_string()),
            other => FolioError::Internal(other.to_string()),
        }
    }
}
