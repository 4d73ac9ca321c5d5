//! The admin surface: a JSON API under `/api/admin` and an HTML shell under
//! `/admin`, both behind the Session Guard from `folio-auth`.

pub mod doc;
pub mod handlers;
pub mod logic;
pub mod pages;
pub mod routes;

pub use handlers::AdminState;
pub use routes::{api_routes, page_routes};
