// --- File: crates/folio_common/src/lib.rs ---

pub mod error; // Boundary error type
pub mod features; // Runtime feature checks
pub mod http; // HTTP responses and outbound client
pub mod logging; // tracing initialisation
pub mod models; // Domain documents shared by every crate
pub mod services; // Clock and service plumbing

pub use error::{
    conflict, internal_error, not_found, service_unavailable, validation_error, FolioError,
    HttpStatusCode,
};

pub use http::{
    client::create_client,
    ApiResult, ErrorResponse, OkResponse,
};

pub use logging::{init, init_with_level, log_result};

pub use features::is_feature_enabled;

pub use services::{BoxFuture, Clock, FixedClock, SystemClock};
