#![cfg(feature = "openapi")]
use crate::logic::{BookingsQuery, CreateJobRequest, UpdateJobRequest};
use folio_common::models::{Booking, BookingSettings, BookingStatus, JobApplication, JobStatus, MeetingType};
use folio_common::ErrorResponse;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::session_handler,
        crate::handlers::list_bookings_handler,
        crate::handlers::cancel_booking_handler,
        crate::handlers::get_settings_handler,
        crate::handlers::put_settings_handler,
        crate::handlers::list_jobs_handler,
        crate::handlers::create_job_handler,
        crate::handlers::update_job_handler,
        crate::handlers::delete_job_handler
    ),
    components(schemas(
        BookingsQuery,
        Booking,
        BookingStatus,
        BookingSettings,
        MeetingType,
        JobApplication,
        JobStatus,
        CreateJobRequest,
        UpdateJobRequest,
        ErrorResponse
    )),
    tags((name = "Admin", description = "Session-guarded admin API"))
)]
pub struct AdminApiDoc;
