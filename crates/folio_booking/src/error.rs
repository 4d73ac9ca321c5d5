use folio_common::FolioError;
use folio_db::DbError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("invalid {field}: {message}")]
    Validation { field: &'static str, message: String },

    #[error("Bookings are currently closed")]
    Closed,

    #[error("slot already booked")]
    Conflict,

    #[error("Booking {0} not found")]
    NotFound(String),

    #[error("Invalid booking configuration: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Db(DbError),
}

impl BookingError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        BookingError::Validation {
            field,
            message: message.into(),
        }
    }
}

impl From<DbError> for BookingError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Conflict => BookingError::Conflict,
            DbError::NotFound(what) => BookingError::NotFound(what),
            other => BookingError::Db(other),
        }
    }
}

impl From<BookingError> for FolioError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::Validation { field, message } => FolioError::Validation {
                field: field.to_string(),
                message,
            },
            BookingError::Closed => FolioError::ServiceUnavailable(err.to_string()),
            BookingError::Conflict => FolioError::Conflict(err.to_string()),
            BookingError::NotFound(_) => FolioError::NotFound(err.to_string()),
            BookingError::Config(msg) => FolioError::Internal(msg),
            BookingError::Db(db) => db.into(),
        }
    }
}
