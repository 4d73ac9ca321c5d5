use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use chrono::{TimeZone, Utc};
use folio_booking::{routes, BookingService};
use folio_common::models::{BookingSettings, MeetingType};
use folio_common::FixedClock;
use folio_config::BookingConfig;
use folio_db::{DbClient, Repositories};
use folio_firebase::StaticFlag;
use folio_integrations::Notifier;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

// Booking flow end to end against a SQLite file.
async fn sqlite_app() -> Router {
    let path = std::env::temp_dir().join(format!(
        "folio-booking-{}-{}.db",
        std::process::id(),
        Utc::now().timestamp_nanos_opt().unwrap_or_default()
    ));
    let client = DbClient::from_url(&format!("sqlite:{}", path.display()))
        .await
        .expect("sqlite pool");
    let repos = Repositories::sql(client).await.expect("schema");
    repos
        .bookings
        .put_settings(&BookingSettings {
            enabled: true,
            timezone: "Europe/Zurich".to_string(),
            meeting_types: vec![
                MeetingType {
                    id: "intro".to_string(),
                    label: "Intro call".to_string(),
                    duration_minutes: 30,
                },
                MeetingType {
                    id: "deep-dive".to_string(),
                    label: "Deep dive".to_string(),
                    duration_minutes: 60,
                },
            ],
            blocked_dates: Vec::new(),
        })
        .await
        .expect("settings");

    // Monday 2030-06-03, 07:00 in Zurich
    let clock = FixedClock(Utc.with_ymd_and_hms(2030, 6, 3, 5, 0, 0).unwrap());
    let service = BookingService::new(
        repos.bookings,
        Arc::new(StaticFlag(None)),
        Arc::new(Notifier::disabled()),
        Arc::new(clock),
        BookingConfig::default(),
    )
    .expect("service");
    routes(Arc::new(service))
}

fn submit(start_at: &str, meeting_type: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/booking")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({
                "name": "Grace Hopper",
                "email": "grace@example.com",
                "meetingType": meeting_type,
                "startAt": start_at
            })
            .to_string(),
        ))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn booked_slot_disappears_from_availability() {
    let app = sqlite_app().await;

    // 10:00 Zurich summer time
    let response = app
        .clone()
        .oneshot(submit("2030-06-03T08:00:00Z", "deep-dive"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // the 10:30 intro overlaps the hour-long deep dive
    let response = app
        .clone()
        .oneshot(submit("2030-06-03T08:30:00Z", "intro"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/booking/availability?days=1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;

    let taken: Vec<(String, String)> = body["days"][0]["slots"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|slot| slot["available"] == json!(false))
        .map(|slot| {
            (
                slot["meetingType"].as_str().unwrap().to_string(),
                slot["startAt"].as_str().unwrap().to_string(),
            )
        })
        .collect();

    assert!(taken.contains(&("intro".to_string(), "2030-06-03T08:00:00Z".to_string())));
    assert!(taken.contains(&("intro".to_string(), "2030-06-03T08:30:00Z".to_string())));
    assert!(taken.contains(&("deep-dive".to_string(), "2030-06-03T08:00:00Z".to_string())));
    assert!(!taken.iter().any(|(_, start)| start == "2030-06-03T09:00:00Z"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_requests_for_the_same_slot() {
    let app = sqlite_app().await;

    let handles: Vec<_> = (0..6)
        .map(|_| {
            let app = app.clone();
            tokio::spawn(async move {
                app.oneshot(submit("2030-06-04T12:00:00Z", "intro"))
                    .await
                    .unwrap()
                    .status()
            })
        })
        .collect();

    let mut statuses = Vec::new();
    for handle in handles {
        statuses.push(handle.await.unwrap());
    }
    assert_eq!(statuses.iter().filter(|s| **s == StatusCode::CREATED).count(), 1);
    assert_eq!(statuses.iter().filter(|s| **s == StatusCode::CONFLICT).count(), 5);
}
