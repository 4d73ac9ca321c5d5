// --- File: crates/folio_common/src/models.rs ---

// Documents shared by the storage layer and the HTTP crates. All of them
// serialize as camelCase JSON.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

pub use folio_config::MeetingType;
use folio_config::BookingDefaults;

/// The singleton booking settings document edited from the admin surface.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BookingSettings {
    pub enabled: bool,
    /// IANA timezone id, e.g. "America/Toronto"
    pub timezone: String,
    pub meeting_types: Vec<MeetingType>,
    /// Local dates on which nothing can be booked
    #[serde(default)]
    pub blocked_dates: Vec<NaiveDate>,
}

impl BookingSettings {
    pub fn meeting_type(&self, id: &str) -> Option<&MeetingType> {
        self.meeting_types.iter().find(|mt| mt.id == id)
    }
}

impl From<&BookingDefaults> for BookingSettings {
    fn from(defaults: &BookingDefaults) -> Self {
        Self {
            enabled: defaults.enabled,
            timezone: defaults.timezone.clone(),
            meeting_types: defaults.meeting_types.clone(),
            blocked_dates: Vec::new(),
        }
    }
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            other => Err(format!("unknown booking status '{}'", other)),
        }
    }
}

/// A booked meeting. Non-cancelled bookings never overlap on
/// `[start_at, end_at)`.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub name: String,
    pub email: String,
    pub meeting_type: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing, default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// A fresh pending booking.
    pub fn new_pending(
        name: String,
        email: String,
        meeting_type: String,
        start_at: DateTime<Utc>,
        end_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            email,
            meeting_type,
            start_at,
            end_at,
            status: BookingStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status != BookingStatus::Cancelled
    }

    /// Half-open interval overlap with `[start, end)`.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start_at < end && start < self.end_at
    }
}

/// Newsletter subscriber, keyed by the hash of the normalized email.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
    pub id: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Subscriber {
    pub fn normalize_email(email: &str) -> String {
        email.trim().to_lowercase()
    }

    /// Hex sha256 of the trimmed, lower-cased email.
    pub fn id_for_email(email: &str) -> String {
        let digest = Sha256::digest(Self::normalize_email(email).as_bytes());
        hex::encode(digest)
    }

    pub fn new(email: &str, now: DateTime<Utc>) -> Self {
        Self {
            id: Self::id_for_email(email),
            email: Self::normalize_email(email),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Names accepted by the analytics sink.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EventName {
    PageView,
    ProjectView,
    ContentClick,
    CertificateView,
    ServiceView,
    BookingOpened,
    BookingSubmitted,
    NewsletterSignup,
    ContactSubmitted,
    ResumeDownload,
}

impl EventName {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventName::PageView => "page_view",
            EventName::ProjectView => "project_view",
            EventName::ContentClick => "content_click",
            EventName::CertificateView => "certificate_view",
            EventName::ServiceView => "service_view",
            EventName::BookingOpened => "booking_opened",
            EventName::BookingSubmitted => "booking_submitted",
            EventName::NewsletterSignup => "newsletter_signup",
            EventName::ContactSubmitted => "contact_submitted",
            EventName::ResumeDownload => "resume_download",
        }
    }
}

impl FromStr for EventName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_value(serde_json::Value::String(s.to_string()))
            .map_err(|_| format!("unknown event name '{}'", s))
    }
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsEvent {
    pub id: String,
    pub name: EventName,
    pub path: Option<String>,
    pub slug: Option<String>,
    pub platform: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: String,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Wishlist,
    Applied,
    Interviewing,
    Offer,
    Rejected,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Wishlist => "wishlist",
            JobStatus::Applied => "applied",
            JobStatus::Interviewing => "interviewing",
            JobStatus::Offer => "offer",
            JobStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wishlist" => Ok(JobStatus::Wishlist),
            "applied" => Ok(JobStatus::Applied),
            "interviewing" => Ok(JobStatus::Interviewing),
            "offer" => Ok(JobStatus::Offer),
            "rejected" => Ok(JobStatus::Rejected),
            other => Err(format!("unknown job status '{}'", other)),
        }
    }
}

/// An entry in the admin job tracker.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct JobApplication {
    pub id: String,
    pub company: String,
    pub role: String,
    pub url: Option<String>,
    pub status: JobStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
