// File: crates/folio_booking/src/service.rs
use crate::error::BookingError;
use crate::logic::{
    compute_availability, parse_timezone, validate_slot_alignment, AvailabilityResponse,
    WorkingHours,
};
use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use folio_common::models::{Booking, BookingSettings, BookingStatus};
use folio_common::Clock;
use folio_config::BookingConfig;
use folio_db::BookingRepository;
use folio_firebase::RemoteFlagSource;
use folio_integrations::Notifier;
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, warn};
use validator::ValidateEmail;

const MAX_NAME_CHARS: usize = 200;
const MIN_DURATION_MINUTES: i64 = 5;
const MAX_DURATION_MINUTES: i64 = 480;

/// Body of `POST /booking`. Missing fields deserialize as empty strings so
/// they are reported field by field.
#[derive(Deserialize, Debug, Clone, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct BookingRequest {
    #[cfg_attr(feature = "openapi", schema(example = "Ada Lovelace"))]
    pub name: String,
    #[cfg_attr(feature = "openapi", schema(example = "ada@example.com"))]
    pub email: String,
    #[cfg_attr(feature = "openapi", schema(example = "intro"))]
    pub meeting_type: String,
    #[cfg_attr(feature = "openapi", schema(example = "2030-01-07T14:00:00Z"))]
    pub start_at: String,
}

/// Availability and booking operations over a [`BookingRepository`].
pub struct BookingService {
    repo: Arc<dyn BookingRepository>,
    flag: Arc<dyn RemoteFlagSource>,
    notifier: Arc<Notifier>,
    clock: Arc<dyn Clock>,
    config: BookingConfig,
    hours: WorkingHours,
}

impl BookingService {
    /// # Errors
    ///
    /// Fails when the working hours or the default settings in `config` are
    /// invalid.
    pub fn new(
        repo: Arc<dyn BookingRepository>,
        flag: Arc<dyn RemoteFlagSource>,
        notifier: Arc<Notifier>,
        clock: Arc<dyn Clock>,
        config: BookingConfig,
    ) -> Result<Self, BookingError> {
        let hours = WorkingHours::from_config(&config)?;
        validate_settings(&BookingSettings::from(&config.defaults))
            .map_err(|e| BookingError::Config(format!("booking defaults: {}", e)))?;

        Ok(Self {
            repo,
            flag,
            notifier,
            clock,
            config,
            hours,
        })
    }

    pub fn config(&self) -> &BookingConfig {
        &self.config
    }

    /// The persisted settings document, or the configured defaults.
    pub async fn get_settings(&self) -> Result<BookingSettings, BookingError> {
        let stored = self.repo.get_settings().await?;
        Ok(stored.unwrap_or_else(|| BookingSettings::from(&self.config.defaults)))
    }

    /// Validate and persist a new settings document.
    pub async fn put_settings(
        &self,
        settings: BookingSettings,
    ) -> Result<BookingSettings, BookingError> {
        validate_settings(&settings)?;
        self.repo.put_settings(&settings).await?;
        info!(
            "Booking settings updated (enabled={}, {} meeting types)",
            settings.enabled,
            settings.meeting_types.len()
        );
        Ok(settings)
    }

    // Settings and the remote flag are independent reads. A failing flag
    // fetch counts as "not set".
    async fn settings_and_enabled(&self) -> Result<(BookingSettings, bool), BookingError> {
        let (flag, settings) = tokio::join!(self.flag.booking_flag(), self.get_settings());
        let settings = settings?;

        let flag = match flag {
            Ok(flag) => flag,
            Err(e) => {
                warn!("Remote booking flag unavailable, using settings: {}", e);
                None
            }
        };
        let enabled = flag.unwrap_or(settings.enabled);
        Ok((settings, enabled))
    }

    fn settings_timezone(settings: &BookingSettings) -> Result<Tz, BookingError> {
        parse_timezone(&settings.timezone).map_err(|e| BookingError::Config(e.to_string()))
    }

    /// Offered days and slots for the next `days` days (configured default
    /// when `None`).
    pub async fn compute_availability(
        &self,
        days: Option<u32>,
    ) -> Result<AvailabilityResponse, BookingError> {
        let days = days.unwrap_or(self.config.default_lookahead_days);
        if days < 1 || days > self.config.max_lookahead_days {
            return Err(BookingError::validation(
                "days",
                format!("must be between 1 and {}", self.config.max_lookahead_days),
            ));
        }

        let (settings, enabled) = self.settings_and_enabled().await?;
        let tz = Self::settings_timezone(&settings)?;
        let now = self.clock.now();

        let bookings = if enabled {
            self.repo
                .list_bookings_in_range(
                    now - Duration::days(1),
                    now + Duration::days(i64::from(days) + 1),
                    false,
                )
                .await?
        } else {
            Vec::new()
        };

        let days = compute_availability(&settings, tz, enabled, &bookings, &self.hours, now, days);

        Ok(AvailabilityResponse {
            enabled,
            timezone: settings.timezone,
            meeting_types: settings.meeting_types,
            days,
        })
    }

    /// Validate, persist and announce a booking.
    ///
    /// Validation runs before the open/closed check, so a malformed request
    /// is always a validation error. The booking is confirmed when none of
    /// the live integrations failed and otherwise stays pending.
    pub async fn submit_booking(&self, request: BookingRequest) -> Result<Booking, BookingError> {
        let now = self.clock.now();
        let (settings, enabled) = self.settings_and_enabled().await?;

        let name = request.name.trim();
        if name.is_empty() {
            return Err(BookingError::validation("name", "must not be empty"));
        }
        if name.chars().count() > MAX_NAME_CHARS {
            return Err(BookingError::validation(
                "name",
                format!("must be at most {} characters", MAX_NAME_CHARS),
            ));
        }

        let email = request.email.trim().to_string();
        if !email.validate_email() {
            return Err(BookingError::validation("email", "is not a valid address"));
        }

        let start_at = DateTime::parse_from_rfc3339(request.start_at.trim())
            .map_err(|_| BookingError::validation("startAt", "must be an RFC 3339 timestamp"))?
            .with_timezone(&Utc);
        if start_at <= now {
            return Err(BookingError::validation("startAt", "must be in the future"));
        }

        let meeting = settings
            .meeting_type(request.meeting_type.trim())
            .ok_or_else(|| {
                BookingError::validation(
                    "meetingType",
                    format!("unknown meeting type '{}'", request.meeting_type),
                )
            })?;

        let tz = Self::settings_timezone(&settings)?;
        let end_at = validate_slot_alignment(
            &settings,
            tz,
            &self.hours,
            meeting,
            start_at,
            now,
            self.config.max_lookahead_days,
        )?;

        if !enabled {
            return Err(BookingError::Closed);
        }

        let booking = Booking::new_pending(
            name.to_string(),
            email,
            meeting.id.clone(),
            start_at,
            end_at,
            now,
        );
        let booking = self.repo.create_booking_if_no_overlap(booking).await?;
        info!(
            "Booking {} created for {} at {}",
            booking.id, booking.meeting_type, booking.start_at
        );

        let outcome = self.notifier.notify_booking(&booking, meeting).await;
        if outcome.any_live_failed() {
            warn!("Booking {} stays pending: {:?}", booking.id, outcome);
            return Ok(booking);
        }

        match self
            .repo
            .update_booking_status(&booking.id, BookingStatus::Confirmed, self.clock.now())
            .await
        {
            Ok(confirmed) => Ok(confirmed),
            Err(e) => {
                warn!("Could not confirm booking {}: {}", booking.id, e);
                Ok(booking)
            }
        }
    }

    /// Bookings intersecting `[from, to)`.
    pub async fn list_bookings(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        include_cancelled: bool,
    ) -> Result<Vec<Booking>, BookingError> {
        if to <= from {
            return Err(BookingError::validation("to", "must be after from"));
        }
        Ok(self
            .repo
            .list_bookings_in_range(from, to, include_cancelled)
            .await?)
    }

    /// Cancel a booking. Cancelling twice returns the cancelled booking.
    pub async fn cancel_booking(&self, id: &str) -> Result<Booking, BookingError> {
        let booking = self
            .repo
            .get_booking(id)
            .await?
            .ok_or_else(|| BookingError::NotFound(id.to_string()))?;

        if booking.status == BookingStatus::Cancelled {
            return Ok(booking);
        }

        let cancelled = self
            .repo
            .update_booking_status(id, BookingStatus::Cancelled, self.clock.now())
            .await?;
        info!("Booking {} cancelled", id);
        Ok(cancelled)
    }
}

/// Settings documents must name a known timezone and carry meeting types with
/// unique non-empty ids and sensible durations.
pub fn validate_settings(settings: &BookingSettings) -> Result<(), BookingError> {
    parse_timezone(&settings.timezone)?;

    let mut seen = HashSet::new();
    for meeting in &settings.meeting_types {
        if meeting.id.trim().is_empty() {
            return Err(BookingError::validation(
                "meetingTypes",
                "meeting type ids must not be empty",
            ));
        }
        if !seen.insert(meeting.id.as_str()) {
            return Err(BookingError::validation(
                "meetingTypes",
                format!("duplicate meeting type '{}'", meeting.id),
            ));
        }
        if !(MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&meeting.duration_minutes) {
            return Err(BookingError::validation(
                "meetingTypes",
                format!(
                    "duration of '{}' must be between {} and {} minutes",
                    meeting.id, MIN_DURATION_MINUTES, MAX_DURATION_MINUTES
                ),
            ));
        }
    }
    Ok(())
}
