// --- File: crates/folio_booking/src/routes.rs ---
use crate::handlers::{get_availability_handler, submit_booking_handler};
use crate::service::BookingService;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Public booking endpoints, mounted under `/api`.
pub fn routes(service: Arc<BookingService>) -> Router {
    Router::new()
        .route("/booking/availability", get(get_availability_handler))
        .route("/booking", post(submit_booking_handler))
        .with_state(service)
}
