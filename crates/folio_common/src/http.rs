// --- File: crates/folio_common/src/http.rs ---
use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use tracing::error;

use crate::error::{FolioError, HttpStatusCode};

pub mod client;

/// Result type returned by the JSON handlers.
pub type ApiResult<T> = Result<T, FolioError>;

/// `{"ok": true}` acknowledgement body.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn new() -> Self {
        Self { ok: true }
    }
}

impl Default for OkResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Error body shared by every endpoint.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, serde::Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for FolioError {
    fn into_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if let FolioError::Internal(detail) = &self {
            error!("internal error: {}", detail);
        }

        (status_code, Json(json!({ "error": self.public_message() }))).into_response()
    }
}

// Malformed bodies are a 400 across the API, not axum's default 415/422.
impl From<JsonRejection> for FolioError {
    fn from(rejection: JsonRejection) -> Self {
        FolioError::Validation {
            field: "body".to_string(),
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for FolioError {
    fn from(rejection: QueryRejection) -> Self {
        FolioError::Validation {
            field: "query".to_string(),
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for FolioError {
    fn from(rejection: PathRejection) -> Self {
        FolioError::Validation {
            field: "path".to_string(),
            message: rejection.body_text(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{conflict, internal_error};

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn conflict_renders_error_body() {
        let response = conflict("slot already booked").into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "slot already booked" })
        );
    }

    #[tokio::test]
    async fn internal_error_is_generic() {
        let response = internal_error("pool timed out").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Internal server error" })
        );
    }
}
