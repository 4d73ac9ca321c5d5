// --- File: crates/folio_auth/src/middleware.rs ---
//! The Session Guard.
//!
//! A request is let through only when the session cookie is present, its
//! signature and expiry verify, and its claims carry `admin == true`. The
//! verified [`Claims`] are then available to handlers as
//! `Extension<Claims>`.

use crate::error::AuthError;
use crate::session::{Claims, IdentityProvider};
use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use folio_common::FolioError;
use folio_config::SessionConfig;
use std::sync::Arc;
use tracing::{debug, info};

/// Shared by the guard middlewares and the sign-in handlers.
#[derive(Clone)]
pub struct AuthState {
    pub identity: Arc<dyn IdentityProvider>,
    pub cookie_name: String,
    pub login_path: String,
    pub max_age_seconds: i64,
    pub secure_cookie: bool,
}

impl AuthState {
    pub fn from_config(config: &SessionConfig, identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            identity,
            cookie_name: config.cookie_name.clone(),
            login_path: config.login_path.clone(),
            max_age_seconds: config.max_age_seconds,
            secure_cookie: config.secure_cookie,
        }
    }
}

/// Verify the session cookie carried by `headers`.
pub async fn authenticate(state: &AuthState, headers: &HeaderMap) -> Result<Claims, AuthError> {
    let jar = CookieJar::from_headers(headers);
    let cookie = jar
        .get(&state.cookie_name)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(AuthError::MissingSession)?;

    let claims = state.identity.verify_session_cookie(&cookie).await?;
    if !claims.admin {
        return Err(AuthError::NotAdmin);
    }
    Ok(claims)
}

/// Guard for admin HTML pages: unauthenticated requests are redirected (303)
/// to the login page.
pub async fn require_admin_page(
    State(state): State<Arc<AuthState>>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    match authenticate(&state, req.headers()).await {
        Ok(claims) => {
            debug!("Admin page access by {}", claims.sub);
            req.extensions_mut().insert(claims);
            next.run(req).await
        }
        Err(e) => {
            info!("Redirecting {} to login: {}", req.uri().path(), e);
            Redirect::to(&state.login_path).into_response()
        }
    }
}

/// Guard for admin JSON APIs: unauthenticated requests get 401 `{error}`.
pub async fn require_admin_api(
    State(state): State<Arc<AuthState>>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    match authenticate(&state, req.headers()).await {
        Ok(claims) => {
            debug!("Admin API access by {}", claims.sub);
            req.extensions_mut().insert(claims);
            next.run(req).await
        }
        Err(e) => {
            info!("Rejecting {}: {}", req.uri().path(), e);
            FolioError::from(e).into_response()
        }
    }
}
