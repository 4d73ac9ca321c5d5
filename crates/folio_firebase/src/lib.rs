//! Firebase Remote Config for Folio
//!
//! The only thing read from Remote Config is the boolean bookings kill
//! switch. [`RemoteFlagSource`] is what the booking service depends on;
//! [`FirebaseFlagSource`] is the live implementation and [`StaticFlag`]
//! stands in when Remote Config is switched off or under test.

pub mod auth;
pub mod client;
pub mod error;
pub mod flag;


pub use auth::{AccessTokenProvider, ServiceAccountTokenProvider, StaticToken};
pub use client::{RemoteConfigClient, RemoteConfigTemplate};
pub use error::RemoteConfigError;
pub use flag::{FirebaseFlagSource, RemoteFlagSource, StaticFlag};
