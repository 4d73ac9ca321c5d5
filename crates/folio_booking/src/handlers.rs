// File: crates/folio_booking/src/handlers.rs
use crate::logic::{AvailabilityQuery, AvailabilityResponse};
use crate::service::{BookingRequest, BookingService};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::Json,
};
use folio_common::models::Booking;
use folio_common::FolioError;
use std::sync::Arc;
use tracing::debug;

/// Handler to get offered days and slots.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/booking/availability",
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Offered days and slots", body = AvailabilityResponse),
        (status = 400, description = "Lookahead out of range", body = folio_common::ErrorResponse),
        (status = 500, description = "Internal error", body = folio_common::ErrorResponse)
    ),
    tag = "Booking"
))]
pub async fn get_availability_handler(
    State(service): State<Arc<BookingService>>,
    query: Result<Query<AvailabilityQuery>, QueryRejection>,
) -> Result<Json<AvailabilityResponse>, FolioError> {
    let Query(query) = query?;
    debug!("Availability requested for {:?} days", query.days);
    let availability = service.compute_availability(query.days).await?;
    Ok(Json(availability))
}

/// Handler to book a slot.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/booking",
    request_body(content = BookingRequest, example = json!({
        "name": "Ada Lovelace",
        "email": "ada@example.com",
        "meetingType": "intro",
        "startAt": "2030-01-07T14:00:00Z"
    })),
    responses(
        (status = 201, description = "Booking created", body = Booking),
        (status = 400, description = "Invalid request", body = folio_common::ErrorResponse,
         example = json!({"error": "invalid startAt: must be in the future"})),
        (status = 409, description = "Slot already booked", body = folio_common::ErrorResponse,
         example = json!({"error": "slot already booked"})),
        (status = 503, description = "Bookings are closed", body = folio_common::ErrorResponse),
        (status = 500, description = "Internal error", body = folio_common::ErrorResponse)
    ),
    tag = "Booking"
))]
pub async fn submit_booking_handler(
    State(service): State<Arc<BookingService>>,
    payload: Result<Json<BookingRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Booking>), FolioError> {
    let Json(request) = payload?;
    let booking = service.submit_booking(request).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}
