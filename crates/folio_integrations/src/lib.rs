//! Outbound integrations for Folio.
//!
//! Each capability (`LeadSink`, `Mailer`, `CalendarInviter`) is wrapped in an
//! [`Integration`] so a switched-off integration fails fast with
//! [`IntegrationError::Disabled`] instead of pretending to work. The
//! [`Notifier`] runs them after a booking.

pub mod calendar;
pub mod crm;
pub mod email;
pub mod error;
pub mod integration;
pub mod notifier;

pub use calendar::{CalendarInvite, CalendarInviter, GoogleCalendarInviter};
pub use crm::{HttpCrmClient, Lead, LeadSink};
pub use email::{EmailMessage, HttpMailer, Mailer};
pub use error::IntegrationError;
pub use integration::Integration;
pub use notifier::{AdapterOutcome, NotificationOutcome, Notifier};
