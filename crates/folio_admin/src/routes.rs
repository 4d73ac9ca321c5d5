// --- File: crates/folio_admin/src/routes.rs ---
use crate::handlers::{
    cancel_booking_handler, create_job_handler, delete_job_handler, get_settings_handler,
    list_bookings_handler, list_jobs_handler, put_settings_handler, session_handler,
    update_job_handler, AdminState,
};
use crate::pages::{dashboard_handler, login_page_handler};
use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};
use folio_auth::{require_admin_api, require_admin_page, AuthState};
use std::sync::Arc;

/// Admin JSON API, mounted under `/api`. Every route requires an admin
/// session and answers 401 otherwise.
pub fn api_routes(state: Arc<AdminState>, auth: Arc<AuthState>) -> Router {
    Router::new()
        .route("/admin/session", get(session_handler))
        .route("/admin/bookings", get(list_bookings_handler))
        .route("/admin/bookings/{id}/cancel", post(cancel_booking_handler))
        .route(
            "/admin/settings",
            get(get_settings_handler).put(put_settings_handler),
        )
        .route("/admin/jobs", get(list_jobs_handler).post(create_job_handler))
        .route(
            "/admin/jobs/{id}",
            patch(update_job_handler).delete(delete_job_handler),
        )
        .layer(middleware::from_fn_with_state(auth, require_admin_api))
        .with_state(state)
}

/// Admin pages at the site root. The dashboard redirects to the login page
/// without an admin session; the login page itself is public.
pub fn page_routes(auth: Arc<AuthState>) -> Router {
    let guarded = Router::new()
        .route("/admin", get(dashboard_handler))
        .layer(middleware::from_fn_with_state(auth, require_admin_page));

    Router::new()
        .route("/admin/login", get(login_page_handler))
        .merge(guarded)
}
