//! Remote Config REST client
//!
//! Reads the published template from
//! `GET {base_url}/v1/projects/{project}/remoteConfig`.

use crate::auth::{AccessTokenProvider, ServiceAccountTokenProvider};
use crate::error::RemoteConfigError;
use folio_config::FirebaseConfig;
use reqwest::{header, Client};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://firebaseremoteconfig.googleapis.com";

/// The subset of a Remote Config template we care about.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RemoteConfigTemplate {
    #[serde(default)]
    pub parameters: HashMap<String, RemoteConfigParameter>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RemoteConfigParameter {
    pub default_value: Option<ParameterValue>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ParameterValue {
    pub value: Option<String>,
    /// Set when the parameter defers to the client's built-in default.
    #[serde(default)]
    pub use_in_app_default: bool,
}

impl RemoteConfigTemplate {
    /// Default value of `key`, `None` when the parameter is missing or defers
    /// to the in-app default.
    pub fn value(&self, key: &str) -> Option<&str> {
        let value = self.parameters.get(key)?.default_value.as_ref()?;
        if value.use_in_app_default {
            return None;
        }
        value.value.as_deref()
    }

    /// Boolean value of `key`. Accepts "true"/"false" in any case.
    pub fn bool_value(&self, key: &str) -> Result<Option<bool>, RemoteConfigError> {
        match self.value(key).map(|v| v.trim().to_ascii_lowercase()) {
            None => Ok(None),
            Some(v) if v == "true" => Ok(Some(true)),
            Some(v) if v == "false" => Ok(Some(false)),
            Some(v) => Err(RemoteConfigError::InvalidValue {
                key: key.to_string(),
                value: v,
            }),
        }
    }
}

pub struct RemoteConfigClient {
    client: Client,
    base_url: String,
    project_id: String,
    tokens: Arc<dyn AccessTokenProvider>,
}

impl RemoteConfigClient {
    pub fn new(
        client: Client,
        base_url: impl Into<String>,
        project_id: impl Into<String>,
        tokens: Arc<dyn AccessTokenProvider>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            project_id: project_id.into(),
            tokens,
        }
    }

    /// Builds a client authenticated with the configured service account.
    ///
    /// # Errors
    ///
    /// Fails when `project_id` or `key_path` is missing.
    pub fn from_config(client: Client, config: &FirebaseConfig) -> Result<Self, RemoteConfigError> {
        let project_id = config.project_id.as_deref().ok_or_else(|| {
            RemoteConfigError::ConfigError("Missing project_id in FirebaseConfig".to_string())
        })?;
        let key_path = config.key_path.as_deref().ok_or_else(|| {
            RemoteConfigError::ConfigError("Missing key_path in FirebaseConfig".to_string())
        })?;

        Ok(Self::new(
            client,
            config.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL),
            project_id,
            Arc::new(ServiceAccountTokenProvider::new(key_path)),
        ))
    }

    pub async fn fetch_template(&self) -> Result<RemoteConfigTemplate, RemoteConfigError> {
        let url = format!(
            "{}/v1/projects/{}/remoteConfig",
            self.base_url, self.project_id
        );
        let token = self.tokens.access_token().await?;

        debug!("Fetching Remote Config template from {}", url);
        let response = self
            .client
            .get(&url)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteConfigError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}
