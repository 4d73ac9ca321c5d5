// --- File: crates/folio_auth/src/routes.rs ---
use crate::handlers::{create_session_handler, logout_handler};
use crate::middleware::AuthState;
use axum::{routing::post, Router};
use std::sync::Arc;

/// Sign-in and logout endpoints, mounted under `/api`.
pub fn routes(state: Arc<AuthState>) -> Router {
    Router::new()
        .route("/auth/session", post(create_session_handler))
        .route("/auth/logout", post(logout_handler))
        .with_state(state)
}
