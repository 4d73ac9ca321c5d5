//! Meeting availability and booking submission.
//!
//! [`logic`] holds the pure slot computation, [`service::BookingService`]
//! wires it to storage, the remote bookings flag and the notifier.

pub mod doc;
pub mod error;
pub mod handlers;
pub mod logic;
#[cfg(test)]
mod logic_proptest;
#[cfg(test)]
mod logic_test;
pub mod routes;
pub mod service;

pub use error::BookingError;
pub use logic::{AvailabilityDay, AvailabilityResponse, TimeSlot, WorkingHours};
pub use routes::routes;
pub use service::{validate_settings, BookingRequest, BookingService};
