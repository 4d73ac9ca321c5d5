// --- File: crates/folio_auth/src/handlers.rs ---
use crate::middleware::AuthState;
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use folio_common::{FolioError, OkResponse};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRequest {
    pub id_token: String,
}

fn session_cookie(state: &AuthState, value: String, max_age_seconds: i64) -> Cookie<'static> {
    Cookie::build((state.cookie_name.clone(), value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.secure_cookie)
        .max_age(cookie::time::Duration::seconds(max_age_seconds))
        .build()
}

/// Exchange an ID token for a session cookie.
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/auth/session",
    request_body = SessionRequest,
    responses(
        (status = 200, description = "Session cookie set", body = OkResponse),
        (status = 400, description = "Malformed body", body = folio_common::ErrorResponse),
        (status = 401, description = "ID token rejected", body = folio_common::ErrorResponse)
    ),
    tag = "Auth"
))]
#[axum::debug_handler]
pub async fn create_session_handler(
    State(state): State<Arc<AuthState>>,
    jar: CookieJar,
    payload: Result<Json<SessionRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<OkResponse>), FolioError> {
    let Json(request) = payload?;
    let value = state.identity.create_session_cookie(&request.id_token).await?;

    info!("Session created");
    let cookie = session_cookie(&state, value, state.max_age_seconds);
    Ok((jar.add(cookie), Json(OkResponse::new())))
}

/// Clear the session cookie.
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/auth/logout",
    responses((status = 200, description = "Session cookie cleared", body = OkResponse)),
    tag = "Auth"
))]
pub async fn logout_handler(
    State(state): State<Arc<AuthState>>,
    jar: CookieJar,
) -> (CookieJar, Json<OkResponse>) {
    let cookie = session_cookie(&state, String::new(), 0);
    (jar.add(cookie), Json(OkResponse::new()))
}
