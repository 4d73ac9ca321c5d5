// File: crates/folio_booking/src/logic.rs
//
// Slot generation and slot validation. Everything in here is a pure function
// of its arguments; the service gathers settings, flag, bookings and "now".

use crate::error::BookingError;
use chrono::{
    DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc, Weekday,
};
use chrono_tz::Tz;
use folio_common::models::{Booking, BookingSettings, MeetingType};
use folio_config::BookingConfig;
use serde::{Deserialize, Serialize};

// --- Data Structures ---

#[derive(Deserialize, Debug, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams, utoipa::ToSchema))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct AvailabilityQuery {
    /// Number of days to look ahead, starting today
    #[cfg_attr(feature = "openapi", schema(example = 14))]
    pub days: Option<u32>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub meeting_type: String,
    #[cfg_attr(feature = "openapi", schema(example = "2030-01-07T14:00:00Z"))]
    pub start_at: DateTime<Utc>,
    #[cfg_attr(feature = "openapi", schema(example = "2030-01-07T14:30:00Z"))]
    pub end_at: DateTime<Utc>,
    pub available: bool,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AvailabilityDay {
    #[cfg_attr(feature = "openapi", schema(example = "2030-01-07"))]
    pub date: NaiveDate,
    pub slots: Vec<TimeSlot>,
}

#[derive(Serialize, Debug, Clone)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub enabled: bool,
    pub timezone: String,
    pub meeting_types: Vec<MeetingType>,
    pub days: Vec<AvailabilityDay>,
}

/// Configuration for working hours and days, in the settings timezone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingHours {
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub working_days: Vec<Weekday>,
}

impl WorkingHours {
    pub fn from_config(config: &BookingConfig) -> Result<Self, BookingError> {
        let parse_time = |value: &str| {
            NaiveTime::parse_from_str(value, "%H:%M")
                .map_err(|_| BookingError::Config(format!("invalid working time '{}'", value)))
        };
        let start_time = parse_time(&config.work_start_time)?;
        let end_time = parse_time(&config.work_end_time)?;
        if end_time <= start_time {
            return Err(BookingError::Config(
                "work_end_time must be after work_start_time".to_string(),
            ));
        }

        let working_days = config
            .working_days
            .iter()
            .map(|day| {
                day.parse::<Weekday>()
                    .map_err(|_| BookingError::Config(format!("invalid working day '{}'", day)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            start_time,
            end_time,
            working_days,
        })
    }

    fn is_working_day(&self, date: NaiveDate) -> bool {
        self.working_days.contains(&date.weekday())
    }
}

pub fn parse_timezone(timezone: &str) -> Result<Tz, BookingError> {
    timezone
        .parse::<Tz>()
        .map_err(|_| BookingError::validation("timezone", format!("unknown timezone '{}'", timezone)))
}

// Local wall-clock time to UTC. Times in a DST gap do not exist and yield
// `None`; ambiguous times resolve to the earlier instant.
fn local_to_utc(tz: &Tz, local: &NaiveDateTime) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(local)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

fn day_is_bookable(settings: &BookingSettings, hours: &WorkingHours, date: NaiveDate) -> bool {
    hours.is_working_day(date) && !settings.blocked_dates.contains(&date)
}

/// Slot starts for one meeting type on `date`: from the start of the working
/// day, stepping by the meeting duration while the slot still ends in time.
fn candidate_starts(
    date: NaiveDate,
    hours: &WorkingHours,
    duration: Duration,
) -> Vec<NaiveDateTime> {
    let day_end = date.and_time(hours.end_time);
    let mut current = date.and_time(hours.start_time);
    let mut starts = Vec::new();
    if duration <= Duration::zero() {
        return starts;
    }
    while current + duration <= day_end {
        starts.push(current);
        current += duration;
    }
    starts
}

/// Days and slots offered for the `days` local dates starting today in the
/// settings timezone.
///
/// A slot is available when it starts after `now` and does not overlap a
/// non-cancelled booking. When `enabled` is false, or the day is not a
/// working day or is blocked, the day carries no slots at all.
pub fn compute_availability(
    settings: &BookingSettings,
    tz: Tz,
    enabled: bool,
    bookings: &[Booking],
    hours: &WorkingHours,
    now: DateTime<Utc>,
    days: u32,
) -> Vec<AvailabilityDay> {
    let today = now.with_timezone(&tz).date_naive();
    let active: Vec<&Booking> = bookings.iter().filter(|b| b.is_active()).collect();

    (0..days)
        .filter_map(|offset| today.checked_add_signed(Duration::days(i64::from(offset))))
        .map(|date| {
            if !enabled || !day_is_bookable(settings, hours, date) {
                return AvailabilityDay {
                    date,
                    slots: Vec::new(),
                };
            }

            let mut slots: Vec<TimeSlot> = settings
                .meeting_types
                .iter()
                .filter(|mt| mt.duration_minutes > 0)
                .flat_map(|mt| {
                    let duration = Duration::minutes(mt.duration_minutes);
                    candidate_starts(date, hours, duration)
                        .into_iter()
                        .filter_map(|local| local_to_utc(&tz, &local))
                        .map(move |start_at| {
                            let end_at = start_at + duration;
                            TimeSlot {
                                meeting_type: mt.id.clone(),
                                start_at,
                                end_at,
                                available: false,
                            }
                        })
                })
                .map(|mut slot| {
                    slot.available = slot.start_at > now
                        && !active.iter().any(|b| b.overlaps(slot.start_at, slot.end_at));
                    slot
                })
                .collect();

            slots.sort_by(|a, b| {
                (a.start_at, a.end_at, &a.meeting_type).cmp(&(b.start_at, b.end_at, &b.meeting_type))
            });

            AvailabilityDay { date, slots }
        })
        .collect()
}

/// Checks that `start_at` is a slot the availability computation could have
/// offered for `meeting`, and returns the slot end.
///
/// The start must fall on a bookable day within `max_days` of today, sit on a
/// multiple of the meeting duration from the start of the working day, and
/// the meeting must end within working hours.
pub fn validate_slot_alignment(
    settings: &BookingSettings,
    tz: Tz,
    hours: &WorkingHours,
    meeting: &MeetingType,
    start_at: DateTime<Utc>,
    now: DateTime<Utc>,
    max_days: u32,
) -> Result<DateTime<Utc>, BookingError> {
    if meeting.duration_minutes <= 0 {
        return Err(BookingError::validation(
            "meetingType",
            format!("meeting type '{}' has no duration", meeting.id),
        ));
    }
    let duration = Duration::minutes(meeting.duration_minutes);
    let local = start_at.with_timezone(&tz).naive_local();
    let date = local.date();

    let today = now.with_timezone(&tz).date_naive();
    let offset_days = (date - today).num_days();
    if offset_days >= i64::from(max_days) {
        return Err(BookingError::validation(
            "startAt",
            format!("must be within {} days", max_days),
        ));
    }

    if !day_is_bookable(settings, hours, date) {
        return Err(BookingError::validation(
            "startAt",
            "no meetings are offered on that day",
        ));
    }

    let aligned = candidate_starts(date, hours, duration)
        .into_iter()
        .any(|candidate| local_to_utc(&tz, &candidate) == Some(start_at));
    if !aligned {
        return Err(BookingError::validation(
            "startAt",
            "does not match an offered slot",
        ));
    }

    Ok(start_at + duration)
}
