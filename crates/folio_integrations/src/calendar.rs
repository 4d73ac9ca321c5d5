// File: crates/folio_integrations/src/calendar.rs
use crate::error::IntegrationError;
use chrono::{DateTime, Utc};
use folio_common::BoxFuture;
use folio_config::CalendarConfig;
use google_calendar3::{
    api::{Event, EventAttendee, EventDateTime},
    hyper_rustls::{self, HttpsConnectorBuilder},
    hyper_util::client::legacy::connect::HttpConnector,
    hyper_util::client::legacy::Client,
    yup_oauth2::{read_service_account_key, ServiceAccountAuthenticator},
    CalendarHub,
};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

type Connector = hyper_rustls::HttpsConnector<HttpConnector>;

pub type HubType = CalendarHub<Connector>;

/// A calendar event for a confirmed meeting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarInvite {
    pub summary: String,
    pub description: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub attendee_email: String,
}

pub trait CalendarInviter: Send + Sync {
    /// Creates the event and returns its id.
    fn create_event(&self, invite: CalendarInvite) -> BoxFuture<'_, String, IntegrationError>;
}

pub async fn create_calendar_hub(config: &CalendarConfig) -> Result<HubType, IntegrationError> {
    let key_path = config
        .key_path
        .as_deref()
        .ok_or_else(|| IntegrationError::ConfigError("Missing key_path in CalendarConfig".into()))?;

    let sa_key = read_service_account_key(Path::new(key_path))
        .await
        .map_err(|e| IntegrationError::ConfigError(format!("service account key: {e}")))?;

    let auth = ServiceAccountAuthenticator::builder(sa_key)
        .build()
        .await
        .map_err(|e| IntegrationError::ConfigError(format!("calendar authenticator: {e}")))?;

    let https = HttpsConnectorBuilder::new()
        .with_native_roots()
        .map_err(|e| IntegrationError::ConfigError(format!("TLS roots: {e}")))?
        .https_or_http()
        .enable_http1()
        .build();

    let client = Client::builder(hyper_util::rt::TokioExecutor::new()).build(https);

    Ok(CalendarHub::new(client, auth))
}

/// Google Calendar via a service account.
pub struct GoogleCalendarInviter {
    calendar_hub: Arc<HubType>,
    calendar_id: String,
}

impl GoogleCalendarInviter {
    pub fn new(calendar_hub: Arc<HubType>, calendar_id: impl Into<String>) -> Self {
        Self {
            calendar_hub,
            calendar_id: calendar_id.into(),
        }
    }

    pub async fn from_config(config: &CalendarConfig) -> Result<Self, IntegrationError> {
        let calendar_id = config
            .calendar_id
            .clone()
            .ok_or_else(|| IntegrationError::ConfigError("Missing calendar_id".into()))?;
        let hub = create_calendar_hub(config).await?;
        Ok(Self::new(Arc::new(hub), calendar_id))
    }
}

impl CalendarInviter for GoogleCalendarInviter {
    fn create_event(&self, invite: CalendarInvite) -> BoxFuture<'_, String, IntegrationError> {
        Box::pin(async move {
            let new_event = Event {
                summary: Some(invite.summary),
                description: invite.description,
                start: Some(EventDateTime {
                    date_time: Some(invite.start),
                    time_zone: Some("UTC".to_string()),
                    ..Default::default()
                }),
                end: Some(EventDateTime {
                    date_time: Some(invite.end),
                    time_zone: Some("UTC".to_string()),
                    ..Default::default()
                }),
                attendees: Some(vec![EventAttendee {
                    email: Some(invite.attendee_email),
                    ..Default::default()
                }]),
                ..Default::default()
            };

            let (_response, created_event) = self
                .calendar_hub
                .events()
                .insert(new_event, &self.calendar_id)
                .send_updates("all")
                .doit()
                .await?;

            let event_id = created_event.id.unwrap_or_default();
            debug!("Calendar event {} created", event_id);
            Ok(event_id)
        })
    }
}
