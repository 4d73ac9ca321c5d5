//! In-memory implementation of every repository.
//!
//! Used by tests and when the backend runs without a `[database]` section.
//! All state sits behind one mutex, which also makes the booking overlap
//! check and insert atomic.

use crate::error::DbError;
use crate::repository::{
    AnalyticsRepository, BookingRepository, ContactRepository, JobRepository,
    SubscriberRepository,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use folio_common::models::{
    AnalyticsEvent, Booking, BookingSettings, BookingStatus, ContactMessage, JobApplication,
    Subscriber,
};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

#[derive(Debug, Default)]
struct State {
    settings: Option<BookingSettings>,
    bookings: HashMap<String, Booking>,
    subscribers: HashMap<String, Subscriber>,
    events: Vec<AnalyticsEvent>,
    messages: Vec<ContactMessage>,
    jobs: HashMap<String, JobApplication>,
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, DbError> {
        self.state
            .lock()
            .map_err(|_| DbError::PoolError("in-memory store lock poisoned".to_string()))
    }

    /// Recorded analytics events, oldest first.
    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.lock().map(|s| s.events.clone()).unwrap_or_default()
    }

    /// Stored contact messages, oldest first.
    pub fn messages(&self) -> Vec<ContactMessage> {
        self.lock().map(|s| s.messages.clone()).unwrap_or_default()
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().map(|s| s.subscribers.len()).unwrap_or_default()
    }
}

#[async_trait]
impl BookingRepository for InMemoryStore {
    async fn get_settings(&self) -> Result<Option<BookingSettings>, DbError> {
        Ok(self.lock()?.settings.clone())
    }

    async fn put_settings(&self, settings: &BookingSettings) -> Result<(), DbError> {
        self.lock()?.settings = Some(settings.clone());
        Ok(())
    }

    async fn list_bookings_in_range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        include_cancelled: bool,
    ) -> Result<Vec<Booking>, DbError> {
        let state = self.lock()?;
        let mut bookings: Vec<Booking> = state
            .bookings
            .values()
            .filter(|b| b.overlaps(from, to))
            .filter(|b| include_cancelled || b.is_active())
            .cloned()
            .collect();
        bookings.sort_by(|a, b| {
            (a.start_at, a.end_at, &a.id).cmp(&(b.start_at, b.end_at, &b.id))
        });
        Ok(bookings)
    }

    async fn create_booking_if_no_overlap(&self, booking: Booking) -> Result<Booking, DbError> {
        let mut state = self.lock()?;
        let clash = state
            .bookings
            .values()
            .any(|b| b.is_active() && b.overlaps(booking.start_at, booking.end_at));
        if clash {
            debug!("Booking at {} overlaps an existing booking", booking.start_at);
            return Err(DbError::Conflict);
        }
        state.bookings.insert(booking.id.clone(), booking.clone());
        Ok(booking)
    }

    async fn get_booking(&self, id: &str) -> Result<Option<Booking>, DbError> {
        Ok(self.lock()?.bookings.get(id).cloned())
    }

    async fn update_booking_status(
        &self,
        id: &str,
        status: BookingStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<Booking, DbError> {
        let mut state = self.lock()?;
        let booking = state
            .bookings
            .get_mut(id)
            .ok_or_else(|| DbError::NotFound(format!("booking {}", id)))?;
        booking.status = status;
        booking.updated_at = updated_at;
        Ok(booking.clone())
    }
}

#[async_trait]
impl SubscriberRepository for InMemoryStore {
    async fn upsert_subscriber(&self, subscriber: Subscriber) -> Result<Subscriber, DbError> {
        let mut state = self.lock()?;
        let stored = state
            .subscribers
            .entry(subscriber.id.clone())
            .and_modify(|existing| existing.updated_at = subscriber.updated_at)
            .or_insert(subscriber);
        Ok(stored.clone())
    }

    async fn get_subscriber(&self, id: &str) -> Result<Option<Subscriber>, DbError> {
        Ok(self.lock()?.subscribers.get(id).cloned())
    }
}

#[async_trait]
impl AnalyticsRepository for InMemoryStore {
    async fn append_event(&self, event: AnalyticsEvent) -> Result<(), DbError> {
        self.lock()?.events.push(event);
        Ok(())
    }
}

#[async_trait]
impl ContactRepository for InMemoryStore {
    async fn save_message(&self, message: ContactMessage) -> Result<(), DbError> {
        self.lock()?.messages.push(message);
        Ok(())
    }
}

#[async_trait]
impl JobRepository for InMemoryStore {
    async fn list_jobs(&self) -> Result<Vec<JobApplication>, DbError> {
        let mut jobs: Vec<JobApplication> = self.lock()?.jobs.values().cloned().collect();
        jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(jobs)
    }

    async fn create_job(&self, job: JobApplication) -> Result<JobApplication, DbError> {
        self.lock()?.jobs.insert(job.id.clone(), job.clone());
        Ok(job)
    }

    async fn get_job(&self, id: &str) -> Result<Option<JobApplication>, DbError> {
        Ok(self.lock()?.jobs.get(id).cloned())
    }

    async fn update_job(&self, job: JobApplication) -> Result<JobApplication, DbError> {
        let mut state = self.lock()?;
        match state.jobs.get_mut(&job.id) {
            Some(existing) => {
                *existing = job.clone();
                Ok(job)
            }
            None => Err(DbError::NotFound(format!("job {}", job.id))),
        }
    }

    async fn delete_job(&self, id: &str) -> Result<bool, DbError> {
        Ok(self.lock()?.jobs.remove(id).is_some())
    }
}
