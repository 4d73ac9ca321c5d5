use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use chrono::{TimeZone, Utc};
use folio_auth::issue_id_token;
use folio_backend::{app_state::AppState, build_app};
use folio_common::FixedClock;
use folio_config::{AppConfig, DatabaseConfig};
use folio_db::Repositories;
use folio_firebase::StaticFlag;
use folio_integrations::Notifier;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

const SESSION_SECRET: &str = "session-secret-for-tests";
const ID_SECRET: &str = "id-token-secret-for-tests";

fn app(flag: Option<bool>) -> Router {
    let config = Arc::new(AppConfig::local(SESSION_SECRET, ID_SECRET));
    // Monday 2030-01-07, 08:00 UTC
    let clock = Arc::new(FixedClock(Utc.with_ymd_and_hms(2030, 1, 7, 8, 0, 0).unwrap()));
    let state = AppState::from_parts(
        config,
        Repositories::in_memory(),
        None,
        Arc::new(StaticFlag(flag)),
        Notifier::disabled(),
        clock,
    )
    .expect("state");
    build_app(&state)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn health_reports_in_memory_store() {
    let response = app(None)
        .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "in-memory");
}

#[tokio::test]
async fn public_routes_are_mounted_under_api() {
    let app = app(Some(true));

    let response = app
        .clone()
        .oneshot(
            Request::get("/api/booking/availability?days=3")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["enabled"], true);
    assert_eq!(body["days"].as_array().unwrap().len(), 3);

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/newsletter/subscribe",
            json!({ "email": "reader@example.com" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(Request::get("/booking/availability").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn remote_flag_closes_bookings() {
    let response = app(Some(false))
        .oneshot(post_json(
            "/api/booking",
            json!({
                "name": "Ada",
                "email": "ada@example.com",
                "meetingType": "intro",
                "startAt": "2030-01-07T15:00:00Z"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn admin_flow_from_login_to_api() {
    let app = app(None);

    let response = app
        .clone()
        .oneshot(Request::get("/admin").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = app
        .clone()
        .oneshot(Request::get("/api/admin/settings").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let id_token = issue_id_token(
        ID_SECRET,
        "owner",
        Some("owner@example.com"),
        true,
        chrono::Duration::minutes(5),
    )
    .unwrap();
    let response = app
        .clone()
        .oneshot(post_json("/api/auth/session", json!({ "idToken": id_token })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    let cookie = set_cookie.split(';').next().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(
            Request::get("/api/admin/settings")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["meetingTypes"].is_array());

    let response = app
        .oneshot(
            Request::get("/admin")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn unsupported_database_url_fails_startup() {
    let mut config = AppConfig::local(SESSION_SECRET, ID_SECRET);
    config.database = Some(DatabaseConfig {
        url: "postgres://localhost/folio".to_string(),
    });

    assert!(AppState::new(Arc::new(config)).await.is_err());
}
