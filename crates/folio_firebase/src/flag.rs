//! The bookings kill switch.

use crate::client::RemoteConfigClient;
use crate::error::RemoteConfigError;
use async_trait::async_trait;
use tracing::debug;

/// Reads the remote bookings flag. `Ok(None)` means the flag is not set and
/// the persisted settings decide.
#[async_trait]
pub trait RemoteFlagSource: Send + Sync {
    async fn booking_flag(&self) -> Result<Option<bool>, RemoteConfigError>;
}

/// A flag that never changes. `StaticFlag(None)` is used when Remote Config is
/// switched off.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticFlag(pub Option<bool>);

#[async_trait]
impl RemoteFlagSource for StaticFlag {
    async fn booking_flag(&self) -> Result<Option<bool>, RemoteConfigError> {
        Ok(self.0)
    }
}

/// Reads one boolean parameter from the live Remote Config template.
pub struct FirebaseFlagSource {
    client: RemoteConfigClient,
    key: String,
}

impl FirebaseFlagSource {
    pub fn new(client: RemoteConfigClient, key: impl Into<String>) -> Self {
        Self {
            client,
            key: key.into(),
        }
    }
}

#[async_trait]
impl RemoteFlagSource for FirebaseFlagSource {
    async fn booking_flag(&self) -> Result<Option<bool>, RemoteConfigError> {
        let template = self.client.fetch_template().await?;
        let flag = template.bool_value(&self.key)?;
        debug!("Remote flag {} = {:?}", self.key, flag);
        Ok(flag)
    }
}
