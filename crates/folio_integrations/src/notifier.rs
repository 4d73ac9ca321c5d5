//! Fan-out to the outbound integrations after a booking or contact message.
//!
//! Every call is bounded by the configured timeout and the three booking
//! calls run concurrently. Nothing here returns an error to the caller: the
//! per-integration outcome is reported instead, and failures are logged.

use crate::calendar::{CalendarInvite, CalendarInviter};
use crate::crm::{Lead, LeadSink};
use crate::email::{EmailMessage, Mailer};
use crate::error::IntegrationError;
use crate::integration::Integration;
use folio_common::models::{Booking, ContactMessage, MeetingType};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// What happened to one integration call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdapterOutcome {
    Delivered,
    Disabled,
    Failed(String),
}

impl AdapterOutcome {
    fn from_result<T>(name: &str, result: Result<T, IntegrationError>) -> Self {
        match result {
            Ok(_) => AdapterOutcome::Delivered,
            Err(e) if e.is_disabled() => {
                debug!("{} skipped: {}", name, e);
                AdapterOutcome::Disabled
            }
            Err(e) => {
                warn!("{} failed: {}", name, e);
                AdapterOutcome::Failed(e.to_string())
            }
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, AdapterOutcome::Failed(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationOutcome {
    pub crm: AdapterOutcome,
    pub email: AdapterOutcome,
    pub calendar: AdapterOutcome,
}

impl NotificationOutcome {
    /// A disabled integration is not a failure.
    pub fn any_live_failed(&self) -> bool {
        self.crm.is_failure() || self.email.is_failure() || self.calendar.is_failure()
    }
}

pub struct Notifier {
    crm: Integration<Arc<dyn LeadSink>>,
    mailer: Integration<Arc<dyn Mailer>>,
    calendar: Integration<Arc<dyn CalendarInviter>>,
    timeout: Duration,
    owner_address: Option<String>,
}

impl Notifier {
    pub fn new(
        crm: Integration<Arc<dyn LeadSink>>,
        mailer: Integration<Arc<dyn Mailer>>,
        calendar: Integration<Arc<dyn CalendarInviter>>,
        timeout: Duration,
    ) -> Self {
        Self {
            crm,
            mailer,
            calendar,
            timeout,
            owner_address: None,
        }
    }

    /// Every integration switched off.
    pub fn disabled() -> Self {
        Self::new(
            Integration::Disabled,
            Integration::Disabled,
            Integration::Disabled,
            Duration::from_secs(5),
        )
    }

    /// Blind-copy booking confirmations to the site owner.
    pub fn with_owner_address(mut self, owner_address: Option<String>) -> Self {
        self.owner_address = owner_address;
        self
    }

    async fn bounded<T>(
        &self,
        name: &'static str,
        call: impl Future<Output = Result<T, IntegrationError>>,
    ) -> Result<T, IntegrationError> {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(IntegrationError::Timeout {
                name,
                seconds: self.timeout.as_secs(),
            }),
        }
    }

    /// CRM lead, confirmation email and calendar invite for a new booking.
    pub async fn notify_booking(
        &self,
        booking: &Booking,
        meeting: &MeetingType,
    ) -> NotificationOutcome {
        let when = booking.start_at.format("%Y-%m-%d %H:%M UTC").to_string();

        let crm = async {
            let sink = self.crm.client("crm")?;
            let lead = Lead {
                email: booking.email.clone(),
                name: booking.name.clone(),
                source: "booking".to_string(),
                note: Some(format!("{} on {}", meeting.label, when)),
            };
            self.bounded("crm", sink.upsert_lead(lead)).await
        };

        let email = async {
            let mailer = self.mailer.client("email")?;
            let message = EmailMessage {
                to: booking.email.clone(),
                bcc: self.owner_address.clone(),
                subject: format!("Your {} is booked", meeting.label),
                text: format!(
                    "Hi {},\n\nyour {} ({} minutes) on {} is booked. Reference: {}.\n",
                    booking.name, meeting.label, meeting.duration_minutes, when, booking.id
                ),
            };
            self.bounded("email", mailer.send_email(message)).await
        };

        let calendar = async {
            let inviter = self.calendar.client("calendar")?;
            let invite = CalendarInvite {
                summary: format!("{} with {}", meeting.label, booking.name),
                description: Some(format!("Booking {}", booking.id)),
                start: booking.start_at,
                end: booking.end_at,
                attendee_email: booking.email.clone(),
            };
            self.bounded("calendar", inviter.create_event(invite)).await
        };

        let (crm, email, calendar) = tokio::join!(crm, email, calendar);

        NotificationOutcome {
            crm: AdapterOutcome::from_result("crm", crm),
            email: AdapterOutcome::from_result("email", email),
            calendar: AdapterOutcome::from_result("calendar", calendar),
        }
    }

    /// Push a contact form sender to the CRM.
    pub async fn notify_contact(&self, message: &ContactMessage) -> AdapterOutcome {
        let result = async {
            let sink = self.crm.client("crm")?;
            let lead = Lead {
                email: message.email.clone(),
                name: message.name.clone(),
                source: "contact".to_string(),
                note: Some(message.message.clone()),
            };
            self.bounded("crm", sink.upsert_lead(lead)).await
        }
        .await;

        AdapterOutcome::from_result("crm", result)
    }
}
