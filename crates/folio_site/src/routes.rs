// --- File: crates/folio_site/src/routes.rs ---
use crate::handlers::{analytics_event_handler, contact_handler, subscribe_handler, SiteState};
use axum::{routing::post, Router};
use std::sync::Arc;

/// Public site endpoints, mounted under `/api`.
pub fn routes(state: Arc<SiteState>) -> Router {
    Router::new()
        .route("/analytics/event", post(analytics_event_handler))
        .route("/newsletter/subscribe", post(subscribe_handler))
        .route("/contact", post(contact_handler))
        .with_state(state)
}
