//! Repository traits for document access
//!
//! The HTTP crates only see these traits. `repositories::sql` and
//! `repositories::memory` provide the SQL and in-memory implementations.

use crate::error::DbError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use folio_common::models::{
    AnalyticsEvent, Booking, BookingSettings, BookingStatus, ContactMessage, JobApplication,
    Subscriber,
};
use std::sync::Arc;

/// Booking settings document plus the bookings themselves.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// The persisted settings document, `None` if the admin never saved one.
    async fn get_settings(&self) -> Result<Option<BookingSettings>, DbError>;

    /// Replace the settings document.
    async fn put_settings(&self, settings: &BookingSettings) -> Result<(), DbError>;

    /// Bookings whose `[start_at, end_at)` intersects `[from, to)`, ordered by
    /// start. Cancelled bookings are skipped unless `include_cancelled`.
    async fn list_bookings_in_range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        include_cancelled: bool,
    ) -> Result<Vec<Booking>, DbError>;

    /// Insert `booking` unless it overlaps a non-cancelled booking.
    ///
    /// Check and insert happen atomically; an overlap yields
    /// [`DbError::Conflict`].
    async fn create_booking_if_no_overlap(&self, booking: Booking) -> Result<Booking, DbError>;

    async fn get_booking(&self, id: &str) -> Result<Option<Booking>, DbError>;

    /// Set the status of a booking. [`DbError::NotFound`] if it does not exist.
    async fn update_booking_status(
        &self,
        id: &str,
        status: BookingStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<Booking, DbError>;
}

#[async_trait]
pub trait SubscriberRepository: Send + Sync {
    /// Insert or refresh a subscriber keyed by its id. `created_at` of an
    /// existing subscriber is preserved.
    async fn upsert_subscriber(&self, subscriber: Subscriber) -> Result<Subscriber, DbError>;

    async fn get_subscriber(&self, id: &str) -> Result<Option<Subscriber>, DbError>;
}

#[async_trait]
pub trait AnalyticsRepository: Send + Sync {
    async fn append_event(&self, event: AnalyticsEvent) -> Result<(), DbError>;
}

#[async_trait]
pub trait ContactRepository: Send + Sync {
    async fn save_message(&self, message: ContactMessage) -> Result<(), DbError>;
}

/// Admin job tracker storage.
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Newest first.
    async fn list_jobs(&self) -> Result<Vec<JobApplication>, DbError>;
    async fn create_job(&self, job: JobApplication) -> Result<JobApplication, DbError>;
    async fn get_job(&self, id: &str) -> Result<Option<JobApplication>, DbError>;
    /// Replace a job. [`DbError::NotFound`] if it does not exist.
    async fn update_job(&self, job: JobApplication) -> Result<JobApplication, DbError>;
    /// `true` if something was deleted.
    async fn delete_job(&self, id: &str) -> Result<bool, DbError>;
}

/// Every repository the application needs, behind trait objects.
#[derive(Clone)]
pub struct Repositories {
    pub bookings: Arc<dyn BookingRepository>,
    pub subscribers: Arc<dyn SubscriberRepository>,
    pub analytics: Arc<dyn AnalyticsRepository>,
    pub contacts: Arc<dyn ContactRepository>,
    pub jobs: Arc<dyn JobRepository>,
}

impl Repositories {
    /// Backed by a single [`crate::InMemoryStore`].
    pub fn in_memory() -> Self {
        Self::from_store(Arc::new(crate::InMemoryStore::new()))
    }

    /// Backed by SQL tables; creates them if needed.
    pub async fn sql(db_client: crate::DbClient) -> Result<Self, DbError> {
        crate::schema::init_schema(&db_client).await?;
        Ok(Self {
            bookings: Arc::new(crate::SqlBookingRepository::new(db_client.clone())),
            subscribers: Arc::new(crate::SqlSiteRepository::new(db_client.clone())),
            analytics: Arc::new(crate::SqlSiteRepository::new(db_client.clone())),
            contacts: Arc::new(crate::SqlSiteRepository::new(db_client.clone())),
            jobs: Arc::new(crate::SqlJobRepository::new(db_client)),
        })
    }

    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: BookingRepository
            + SubscriberRepository
            + AnalyticsRepository
            + ContactRepository
            + JobRepository
            + 'static,
    {
        Self {
            bookings: store.clone(),
            subscribers: store.clone(),
            analytics: store.clone(),
            contacts: store.clone(),
            jobs: store,
        }
    }
}
