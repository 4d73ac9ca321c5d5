// --- File: crates/folio_integrations/src/email.rs ---
//! Transactional email over an HTTP API.

use crate::error::IntegrationError;
use folio_common::BoxFuture;
use folio_config::EmailConfig;
use reqwest::{header, Client};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub bcc: Option<String>,
    pub subject: String,
    pub text: String,
}

pub trait Mailer: Send + Sync {
    fn send_email(&self, message: EmailMessage) -> BoxFuture<'_, (), IntegrationError>;
}

#[derive(Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: Vec<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    bcc: Vec<&'a str>,
    subject: &'a str,
    text: &'a str,
}

/// `POST {base_url}/emails` with a bearer API key.
pub struct HttpMailer {
    client: Client,
    base_url: String,
    api_key: String,
    from_address: String,
}

impl HttpMailer {
    pub fn new(client: Client, config: &EmailConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            from_address: config.from_address.clone(),
        }
    }
}

impl Mailer for HttpMailer {
    fn send_email(&self, message: EmailMessage) -> BoxFuture<'_, (), IntegrationError> {
        Box::pin(async move {
            let url = format!("{}/emails", self.base_url);
            let body = SendRequest {
                from: &self.from_address,
                to: vec![message.to.as_str()],
                bcc: message.bcc.as_deref().into_iter().collect(),
                subject: &message.subject,
                text: &message.text,
            };

            debug!("Sending email '{}'", message.subject);
            let response = self
                .client
                .post(&url)
                .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
                .json(&body)
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                return Err(IntegrationError::ApiError {
                    service: "email",
                    status: status.as_u16(),
                    body: response.text().await.unwrap_or_default(),
                });
            }
            Ok(())
        })
    }
}
