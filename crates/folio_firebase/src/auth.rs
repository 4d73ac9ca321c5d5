//! OAuth2 access tokens for the Remote Config REST API

use crate::error::RemoteConfigError;
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;
use yup_oauth2::{read_service_account_key, ServiceAccountAuthenticator};

const REMOTE_CONFIG_SCOPE: &str = "https://www.googleapis.com/auth/firebase.remoteconfig";

// Google access tokens live for an hour.
const TOKEN_REUSE: Duration = Duration::from_secs(50 * 60);

/// Something that can hand out bearer tokens.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    async fn access_token(&self) -> Result<String, RemoteConfigError>;
}

/// Fixed token, for tests and local emulators.
#[derive(Debug, Clone)]
pub struct StaticToken(pub String);

#[async_trait]
impl AccessTokenProvider for StaticToken {
    async fn access_token(&self) -> Result<String, RemoteConfigError> {
        Ok(self.0.clone())
    }
}

/// Service account tokens via `yup-oauth2`, reused until shortly before expiry.
pub struct ServiceAccountTokenProvider {
    key_path: PathBuf,
    cached: Mutex<Option<(String, Instant)>>,
}

impl ServiceAccountTokenProvider {
    pub fn new(key_path: impl Into<PathBuf>) -> Self {
        Self {
            key_path: key_path.into(),
            cached: Mutex::new(None),
        }
    }

    async fn fetch(&self) -> Result<String, RemoteConfigError> {
        let sa_key = read_service_account_key(&self.key_path)
            .await
            .map_err(|e| RemoteConfigError::AuthError(format!("reading service account key: {e}")))?;

        let auth = ServiceAccountAuthenticator::builder(sa_key)
            .build()
            .await
            .map_err(|e| RemoteConfigError::AuthError(e.to_string()))?;

        let token = auth
            .token(&[REMOTE_CONFIG_SCOPE])
            .await
            .map_err(|e| RemoteConfigError::AuthError(e.to_string()))?;

        token
            .token()
            .map(str::to_string)
            .ok_or_else(|| RemoteConfigError::AuthError("No token available".to_string()))
    }
}

#[async_trait]
impl AccessTokenProvider for ServiceAccountTokenProvider {
    async fn access_token(&self) -> Result<String, RemoteConfigError> {
        let mut cached = self.cached.lock().await;
        if let Some((token, fetched_at)) = cached.as_ref() {
            if fetched_at.elapsed() < TOKEN_REUSE {
                return Ok(token.clone());
            }
        }

        debug!("Fetching Remote Config access token");
        let token = self.fetch().await?;
        *cached = Some((token.clone(), Instant::now()));
        Ok(token)
    }
}
