// --- File: crates/folio_auth/src/lib.rs ---
pub mod error;
pub mod handlers;
#[cfg(test)]
mod handlers_test;
pub mod middleware;
#[cfg(test)]
mod middleware_test;
pub mod routes;
pub mod session;
#[cfg(test)]
mod session_test;

pub use error::AuthError;
pub use middleware::{authenticate, require_admin_api, require_admin_page, AuthState};
pub use routes::routes;
pub use session::{issue_id_token, Claims, IdentityProvider, JwtIdentityProvider};
