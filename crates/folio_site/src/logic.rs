// File: crates/folio_site/src/logic.rs
//
// Request bodies of the public site endpoints and their validation.

use chrono::{DateTime, Utc};
use folio_common::models::{AnalyticsEvent, ContactMessage, EventName, Subscriber};
use folio_common::{validation_error, FolioError};
use serde::Deserialize;
use validator::ValidateEmail;

const MAX_ATTRIBUTE_CHARS: usize = 512;
const MAX_NAME_CHARS: usize = 200;
const MAX_MESSAGE_CHARS: usize = 5000;

#[derive(Deserialize, Debug, Clone)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AnalyticsEventRequest {
    /// One of the known event names, e.g. `page_view`
    #[cfg_attr(feature = "openapi", schema(example = "project_view"))]
    pub name: String,
    #[cfg_attr(feature = "openapi", schema(example = "/projects/folio"))]
    pub path: Option<String>,
    #[cfg_attr(feature = "openapi", schema(example = "folio"))]
    pub slug: Option<String>,
    #[cfg_attr(feature = "openapi", schema(example = "web"))]
    pub platform: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NewsletterRequest {
    #[cfg_attr(feature = "openapi", schema(example = "ada@example.com"))]
    pub email: String,
}

#[derive(Deserialize, Debug, Clone)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}

// Blank optional attributes are dropped.
fn attribute(field: &str, value: Option<String>) -> Result<Option<String>, FolioError> {
    match value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
        Some(v) if v.chars().count() > MAX_ATTRIBUTE_CHARS => Err(validation_error(
            field,
            format!("must be at most {} characters", MAX_ATTRIBUTE_CHARS),
        )),
        other => Ok(other),
    }
}

fn checked_email(email: &str) -> Result<String, FolioError> {
    let email = email.trim().to_string();
    if !email.validate_email() {
        return Err(validation_error("email", "is not a valid address"));
    }
    Ok(email)
}

fn bounded_text(field: &str, value: &str, max: usize) -> Result<String, FolioError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(validation_error(field, "must not be empty"));
    }
    if value.chars().count() > max {
        return Err(validation_error(
            field,
            format!("must be at most {} characters", max),
        ));
    }
    Ok(value.to_string())
}

impl AnalyticsEventRequest {
    pub fn into_event(self, now: DateTime<Utc>) -> Result<AnalyticsEvent, FolioError> {
        let name = self
            .name
            .trim()
            .parse::<EventName>()
            .map_err(|e| validation_error("name", e))?;

        Ok(AnalyticsEvent {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            path: attribute("path", self.path)?,
            slug: attribute("slug", self.slug)?,
            platform: attribute("platform", self.platform)?,
            created_at: now,
        })
    }
}

impl NewsletterRequest {
    pub fn into_subscriber(self, now: DateTime<Utc>) -> Result<Subscriber, FolioError> {
        let email = checked_email(&self.email)?;
        Ok(Subscriber::new(&email, now))
    }
}

impl ContactRequest {
    pub fn into_message(self, now: DateTime<Utc>) -> Result<ContactMessage, FolioError> {
        Ok(ContactMessage {
            id: uuid::Uuid::new_v4().to_string(),
            name: bounded_text("name", &self.name, MAX_NAME_CHARS)?,
            email: checked_email(&self.email)?,
            message: bounded_text("message", &self.message, MAX_MESSAGE_CHARS)?,
            created_at: now,
        })
    }
}
