// --- File: crates/folio_integrations/src/crm.rs ---
//! CRM lead upserts over a JSON HTTP API.

use crate::error::IntegrationError;
use folio_common::BoxFuture;
use folio_config::CrmConfig;
use reqwest::{header, Client};
use serde::Serialize;
use tracing::debug;

/// A contact pushed to the CRM. The CRM deduplicates on `email`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub email: String,
    pub name: String,
    /// Where the lead came from, e.g. "booking" or "contact"
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

pub trait LeadSink: Send + Sync {
    fn upsert_lead(&self, lead: Lead) -> BoxFuture<'_, (), IntegrationError>;
}

/// `PUT {base_url}/leads` with a bearer API key.
pub struct HttpCrmClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HttpCrmClient {
    pub fn new(client: Client, config: &CrmConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }
}

impl LeadSink for HttpCrmClient {
    fn upsert_lead(&self, lead: Lead) -> BoxFuture<'_, (), IntegrationError> {
        Box::pin(async move {
            let url = format!("{}/leads", self.base_url);
            debug!("Upserting CRM lead from {}", lead.source);

            let response = self
                .client
                .put(&url)
                .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
                .json(&lead)
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                return Err(IntegrationError::ApiError {
                    service: "crm",
                    status: status.as_u16(),
                    body: response.text().await.unwrap_or_default(),
                });
            }
            Ok(())
        })
    }
}
