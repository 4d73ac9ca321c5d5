#![cfg(feature = "openapi")]
use crate::logic::{AnalyticsEventRequest, ContactRequest, NewsletterRequest};
use folio_common::{ErrorResponse, OkResponse};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::analytics_event_handler,
        crate::handlers::subscribe_handler,
        crate::handlers::contact_handler
    ),
    components(schemas(
        AnalyticsEventRequest,
        NewsletterRequest,
        ContactRequest,
        OkResponse,
        ErrorResponse
    )),
    tags((name = "Site", description = "Analytics, newsletter and contact form"))
)]
pub struct SiteApiDoc;
