//! The Folio HTTP server: every feature router mounted on one axum app.

pub mod app_state;
pub mod health;
pub mod service_factory;

use crate::app_state::AppState;
use crate::health::health_handler;
use axum::{routing::get, Router};
use std::sync::Arc;

/// Public and admin APIs under `/api`, admin pages at the root.
pub fn build_app(state: &AppState) -> Router {
    let health = Router::new()
        .route("/health", get(health_handler))
        .with_state(Arc::new(state.db.clone()));

    let api = Router::new()
        .merge(health)
        .merge(folio_auth::routes(state.auth.clone()))
        .merge(folio_booking::routes(state.bookings.clone()))
        .merge(folio_site::routes(state.site.clone()))
        .merge(folio_admin::api_routes(
            state.admin.clone(),
            state.auth.clone(),
        ));

    #[allow(unused_mut)] // mutated only with the openapi feature
    let mut app = Router::new()
        .nest("/api", api)
        .merge(folio_admin::page_routes(state.auth.clone()));

    #[cfg(feature = "openapi")]
    {
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Folio API",
                version = "0.1.0",
                description = "Portfolio site backend: bookings, newsletter, contact and admin"
            ),
            paths(crate::health::health_handler),
            components(schemas(crate::health::HealthResponse)),
            tags((name = "Folio", description = "Service endpoints")),
            servers((url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        #[derive(OpenApi)]
        #[openapi(
            paths(
                folio_auth::handlers::create_session_handler,
                folio_auth::handlers::logout_handler
            ),
            components(schemas(folio_auth::handlers::SessionRequest))
        )]
        struct AuthApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(AuthApiDoc::openapi());
        openapi_doc.merge(folio_booking::doc::BookingApiDoc::openapi());
        openapi_doc.merge(folio_site::doc::SiteApiDoc::openapi());
        openapi_doc.merge(folio_admin::doc::AdminApiDoc::openapi());
        tracing::info!("📖 Adding Swagger UI at /api/docs");

        let swagger_ui =
            SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc);
        app = app.merge(swagger_ui);
    }

    app
}
