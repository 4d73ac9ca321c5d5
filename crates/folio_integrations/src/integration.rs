//! Switchable integrations.

use crate::error::IntegrationError;

/// An outbound capability that is either switched off or backed by a client.
#[derive(Debug, Clone)]
pub enum Integration<C> {
    Disabled,
    Live(C),
}

impl<C> Integration<C> {
    /// The live client, or [`IntegrationError::Disabled`] right away.
    pub fn client(&self, name: &'static str) -> Result<&C, IntegrationError> {
        match self {
            Integration::Live(c) => Ok(c),
            Integration::Disabled => Err(IntegrationError::Disabled(name)),
        }
    }
}

impl<C> Default for Integration<C> {
    fn default() -> Self {
        Integration::Disabled
    }
}
