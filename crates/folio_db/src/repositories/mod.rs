//! Repository implementations

pub mod booking_sql;
pub mod job_sql;
pub mod memory;
pub mod site_sql;

pub use booking_sql::SqlBookingRepository;
pub use job_sql::SqlJobRepository;
pub use memory::InMemoryStore;
pub use site_sql::SqlSiteRepository;

use crate::error::DbError;
use chrono::{DateTime, Utc};

pub(crate) fn to_millis(at: DateTime<Utc>) -> i64 {
    at.timestamp_millis()
}

pub(crate) fn from_millis(ms: i64) -> Result<DateTime<Utc>, DbError> {
    DateTime::<Utc>::from_timestamp_millis(ms)
        .ok_or_else(|| DbError::DecodeError(format!("timestamp {} out of range", ms)))
}
