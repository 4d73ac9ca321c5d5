// File: crates/folio_booking/src/doc.rs

#![cfg(feature = "openapi")]
use crate::logic::{AvailabilityDay, AvailabilityQuery, AvailabilityResponse, TimeSlot};
use crate::service::BookingRequest;
use folio_common::models::{Booking, BookingStatus, MeetingType};
use folio_common::ErrorResponse;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::get_availability_handler,
        crate::handlers::submit_booking_handler
    ),
    components(
        schemas(
            AvailabilityQuery,
            AvailabilityResponse,
            AvailabilityDay,
            TimeSlot,
            MeetingType,
            BookingRequest,
            Booking,
            BookingStatus,
            ErrorResponse
        )
    ),
    tags(
        (name = "Booking", description = "Meeting availability and booking")
    ),
    servers(
        (url = "/api", description = "Folio API")
    )
)]
pub struct BookingApiDoc;
