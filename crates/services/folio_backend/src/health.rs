use axum::{extract::State, response::Json};
use folio_db::DbClient;
use serde::Serialize;
use std::sync::Arc;

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "ok" or "degraded"
    pub status: String,
    /// "ok", "unavailable" or "in-memory"
    pub database: String,
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service health", body = HealthResponse)),
    tag = "Folio"
))]
pub async fn health_handler(State(db): State<Arc<Option<DbClient>>>) -> Json<HealthResponse> {
    let database = match &*db {
        Some(client) => {
            if client.is_healthy().await {
                "ok"
            } else {
                "unavailable"
            }
        }
        None => "in-memory",
    };
    let status = if database == "unavailable" {
        "degraded"
    } else {
        "ok"
    };
    Json(HealthResponse {
        status: status.to_string(),
        database: database.to_string(),
    })
}
