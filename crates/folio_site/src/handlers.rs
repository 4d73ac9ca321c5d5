// File: crates/folio_site/src/handlers.rs
use crate::logic::{AnalyticsEventRequest, ContactRequest, NewsletterRequest};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};
use folio_common::{ApiResult, Clock, OkResponse};
use folio_db::{AnalyticsRepository, ContactRepository, Repositories, SubscriberRepository};
use folio_integrations::Notifier;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Clone)]
pub struct SiteState {
    pub subscribers: Arc<dyn SubscriberRepository>,
    pub analytics: Arc<dyn AnalyticsRepository>,
    pub contacts: Arc<dyn ContactRepository>,
    pub notifier: Arc<Notifier>,
    pub clock: Arc<dyn Clock>,
}

impl SiteState {
    pub fn new(repos: &Repositories, notifier: Arc<Notifier>, clock: Arc<dyn Clock>) -> Self {
        Self {
            subscribers: repos.subscribers.clone(),
            analytics: repos.analytics.clone(),
            contacts: repos.contacts.clone(),
            notifier,
            clock,
        }
    }
}

/// Record an analytics event.
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/analytics/event",
    request_body = AnalyticsEventRequest,
    responses(
        (status = 202, description = "Event recorded", body = OkResponse),
        (status = 400, description = "Unknown event name or malformed body", body = folio_common::ErrorResponse)
    ),
    tag = "Site"
))]
pub async fn analytics_event_handler(
    State(state): State<Arc<SiteState>>,
    payload: Result<Json<AnalyticsEventRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<OkResponse>)> {
    let Json(request) = payload?;
    let event = request.into_event(state.clock.now())?;
    debug!("Analytics event {}", event.name.as_str());
    state.analytics.append_event(event).await?;
    Ok((StatusCode::ACCEPTED, Json(OkResponse::new())))
}

/// Subscribe to the newsletter. Subscribing twice is harmless.
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/newsletter/subscribe",
    request_body = NewsletterRequest,
    responses(
        (status = 200, description = "Subscribed", body = OkResponse),
        (status = 400, description = "Invalid email", body = folio_common::ErrorResponse)
    ),
    tag = "Site"
))]
pub async fn subscribe_handler(
    State(state): State<Arc<SiteState>>,
    payload: Result<Json<NewsletterRequest>, JsonRejection>,
) -> ApiResult<Json<OkResponse>> {
    let Json(request) = payload?;
    let subscriber = request.into_subscriber(state.clock.now())?;
    let stored = state.subscribers.upsert_subscriber(subscriber).await?;
    info!("Newsletter subscriber {} saved", stored.id);
    Ok(Json(OkResponse::new()))
}

/// Store a contact form message and pass the sender on to the CRM.
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/contact",
    request_body = ContactRequest,
    responses(
        (status = 201, description = "Message received", body = OkResponse),
        (status = 400, description = "Invalid message", body = folio_common::ErrorResponse)
    ),
    tag = "Site"
))]
pub async fn contact_handler(
    State(state): State<Arc<SiteState>>,
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<OkResponse>)> {
    let Json(request) = payload?;
    let message = request.into_message(state.clock.now())?;
    state.contacts.save_message(message.clone()).await?;
    info!("Contact message {} saved", message.id);

    // best effort, the outcome is logged by the notifier
    state.notifier.notify_contact(&message).await;

    Ok((StatusCode::CREATED, Json(OkResponse::new())))
}
