// File: crates/folio_admin/src/handlers.rs
use crate::logic::{BookingsQuery, CreateJobRequest, UpdateJobRequest};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Json,
    Extension,
};
use chrono::Duration;
use folio_auth::Claims;
use folio_booking::BookingService;
use folio_common::models::{Booking, BookingSettings, JobApplication};
use folio_common::{not_found, validation_error, Clock, FolioError};
use folio_db::JobRepository;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct AdminState {
    pub bookings: Arc<BookingService>,
    pub jobs: Arc<dyn JobRepository>,
    pub clock: Arc<dyn Clock>,
}

/// The signed-in admin.
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/admin/session",
    responses(
        (status = 200, description = "Claims of the current session"),
        (status = 401, description = "Not signed in", body = folio_common::ErrorResponse)
    ),
    tag = "Admin"
))]
pub async fn session_handler(Extension(claims): Extension<Claims>) -> Json<Claims> {
    Json(claims)
}

/// Bookings in a time range.
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/admin/bookings",
    params(BookingsQuery),
    responses(
        (status = 200, description = "Bookings ordered by start", body = Vec<Booking>),
        (status = 400, description = "Invalid range", body = folio_common::ErrorResponse),
        (status = 401, description = "Not signed in", body = folio_common::ErrorResponse)
    ),
    tag = "Admin"
))]
pub async fn list_bookings_handler(
    State(state): State<Arc<AdminState>>,
    query: Result<Query<BookingsQuery>, QueryRejection>,
) -> Result<Json<Vec<Booking>>, FolioError> {
    let Query(query) = query?;
    let from = query.from.unwrap_or_else(|| state.clock.now());
    let to = match query.to {
        Some(to) => to,
        None => from
            .checked_add_signed(Duration::days(i64::from(
                state.bookings.config().max_lookahead_days,
            )))
            .ok_or_else(|| validation_error("from", "is too far in the future"))?,
    };

    let bookings = state
        .bookings
        .list_bookings(from, to, query.include_cancelled)
        .await?;
    Ok(Json(bookings))
}

/// Cancel a booking. Cancelling an already cancelled booking is a no-op.
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/admin/bookings/{id}/cancel",
    params(("id" = String, Path, description = "Booking id")),
    responses(
        (status = 200, description = "The cancelled booking", body = Booking),
        (status = 404, description = "Unknown booking", body = folio_common::ErrorResponse)
    ),
    tag = "Admin"
))]
pub async fn cancel_booking_handler(
    State(state): State<Arc<AdminState>>,
    Extension(claims): Extension<Claims>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<Booking>, FolioError> {
    let Path(id) = id?;
    let booking = state.bookings.cancel_booking(&id).await?;
    info!("Booking {} cancelled by {}", id, claims.sub);
    Ok(Json(booking))
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/admin/settings",
    responses((status = 200, description = "Current booking settings", body = BookingSettings)),
    tag = "Admin"
))]
pub async fn get_settings_handler(
    State(state): State<Arc<AdminState>>,
) -> Result<Json<BookingSettings>, FolioError> {
    Ok(Json(state.bookings.get_settings().await?))
}

/// Replace the booking settings document.
#[cfg_attr(feature = "openapi", utoipa::path(
    put,
    path = "/admin/settings",
    request_body = BookingSettings,
    responses(
        (status = 200, description = "Saved settings", body = BookingSettings),
        (status = 400, description = "Invalid settings", body = folio_common::ErrorResponse)
    ),
    tag = "Admin"
))]
pub async fn put_settings_handler(
    State(state): State<Arc<AdminState>>,
    payload: Result<Json<BookingSettings>, JsonRejection>,
) -> Result<Json<BookingSettings>, FolioError> {
    let Json(settings) = payload?;
    Ok(Json(state.bookings.put_settings(settings).await?))
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/admin/jobs",
    responses((status = 200, description = "Tracked applications, newest first", body = Vec<JobApplication>)),
    tag = "Admin"
))]
pub async fn list_jobs_handler(
    State(state): State<Arc<AdminState>>,
) -> Result<Json<Vec<JobApplication>>, FolioError> {
    Ok(Json(state.jobs.list_jobs().await?))
}

#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/admin/jobs",
    request_body = CreateJobRequest,
    responses(
        (status = 201, description = "Application tracked", body = JobApplication),
        (status = 400, description = "Invalid application", body = folio_common::ErrorResponse)
    ),
    tag = "Admin"
))]
pub async fn create_job_handler(
    State(state): State<Arc<AdminState>>,
    payload: Result<Json<CreateJobRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<JobApplication>), FolioError> {
    let Json(request) = payload?;
    let job = request.into_job(state.clock.now())?;
    let job = state.jobs.create_job(job).await?;
    Ok((StatusCode::CREATED, Json(job)))
}

#[cfg_attr(feature = "openapi", utoipa::path(
    patch,
    path = "/admin/jobs/{id}",
    params(("id" = String, Path, description = "Job id")),
    request_body = UpdateJobRequest,
    responses(
        (status = 200, description = "Updated application", body = JobApplication),
        (status = 404, description = "Unknown job", body = folio_common::ErrorResponse)
    ),
    tag = "Admin"
))]
pub async fn update_job_handler(
    State(state): State<Arc<AdminState>>,
    id: Result<Path<String>, PathRejection>,
    payload: Result<Json<UpdateJobRequest>, JsonRejection>,
) -> Result<Json<JobApplication>, FolioError> {
    let Path(id) = id?;
    let Json(request) = payload?;

    let job = state
        .jobs
        .get_job(&id)
        .await?
        .ok_or_else(|| not_found(format!("Job {} not found", id)))?;
    let job = request.apply(job, state.clock.now())?;
    Ok(Json(state.jobs.update_job(job).await?))
}

#[cfg_attr(feature = "openapi", utoipa::path(
    delete,
    path = "/admin/jobs/{id}",
    params(("id" = String, Path, description = "Job id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Unknown job", body = folio_common::ErrorResponse)
    ),
    tag = "Admin"
))]
pub async fn delete_job_handler(
    State(state): State<Arc<AdminState>>,
    id: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, FolioError> {
    let Path(id) = id?;
    if state.jobs.delete_job(&id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(format!("Job {} not found", id)))
    }
}
