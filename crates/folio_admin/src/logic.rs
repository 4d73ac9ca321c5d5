// File: crates/folio_admin/src/logic.rs
use chrono::{DateTime, Utc};
use folio_common::models::{JobApplication, JobStatus};
use folio_common::{validation_error, FolioError};
use serde::Deserialize;

const MAX_TEXT_CHARS: usize = 200;
const MAX_URL_CHARS: usize = 2048;
const MAX_NOTES_CHARS: usize = 10_000;

#[derive(Deserialize, Debug, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams, utoipa::ToSchema))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
#[serde(rename_all = "camelCase")]
pub struct BookingsQuery {
    /// Start of the range (RFC 3339), defaults to now
    pub from: Option<DateTime<Utc>>,
    /// End of the range (RFC 3339), defaults to the booking lookahead
    pub to: Option<DateTime<Utc>>,
    #[serde(default)]
    pub include_cancelled: bool,
}

#[derive(Deserialize, Debug, Clone)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CreateJobRequest {
    #[cfg_attr(feature = "openapi", schema(example = "Acme"))]
    pub company: String,
    #[cfg_attr(feature = "openapi", schema(example = "Rust engineer"))]
    pub role: String,
    pub url: Option<String>,
    /// Defaults to `wishlist`
    pub status: Option<JobStatus>,
    pub notes: Option<String>,
}

/// Partial update. Absent fields are left alone; a blank `url` or `notes`
/// clears the field.
#[derive(Deserialize, Debug, Clone, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct UpdateJobRequest {
    pub company: Option<String>,
    pub role: Option<String>,
    pub url: Option<String>,
    pub status: Option<JobStatus>,
    pub notes: Option<String>,
}

fn required(field: &str, value: &str) -> Result<String, FolioError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(validation_error(field, "must not be empty"));
    }
    if value.chars().count() > MAX_TEXT_CHARS {
        return Err(validation_error(
            field,
            format!("must be at most {} characters", MAX_TEXT_CHARS),
        ));
    }
    Ok(value.to_string())
}

fn optional(field: &str, value: &str, max: usize) -> Result<Option<String>, FolioError> {
    let value = value.trim();
    if value.chars().count() > max {
        return Err(validation_error(
            field,
            format!("must be at most {} characters", max),
        ));
    }
    Ok(Some(value.to_string()).filter(|v| !v.is_empty()))
}

impl CreateJobRequest {
    pub fn into_job(self, now: DateTime<Utc>) -> Result<JobApplication, FolioError> {
        Ok(JobApplication {
            id: uuid::Uuid::new_v4().to_string(),
            company: required("company", &self.company)?,
            role: required("role", &self.role)?,
            url: match self.url {
                Some(url) => optional("url", &url, MAX_URL_CHARS)?,
                None => None,
            },
            status: self.status.unwrap_or(JobStatus::Wishlist),
            notes: match self.notes {
                Some(notes) => optional("notes", &notes, MAX_NOTES_CHARS)?,
                None => None,
            },
            created_at: now,
            updated_at: now,
        })
    }
}

impl UpdateJobRequest {
    pub fn apply(self, mut job: JobApplication, now: DateTime<Utc>) -> Result<JobApplication, FolioError> {
        if let Some(company) = self.company {
            job.company = required("company", &company)?;
        }
        if let Some(role) = self.role {
            job.role = required("role", &role)?;
        }
        if let Some(url) = self.url {
            job.url = optional("url", &url, MAX_URL_CHARS)?;
        }
        if let Some(status) = self.status {
            job.status = status;
        }
        if let Some(notes) = self.notes {
            job.notes = optional("notes", &notes, MAX_NOTES_CHARS)?;
        }
        job.updated_at = now;
        Ok(job)
    }
}
