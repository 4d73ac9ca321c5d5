pub mod doc;
pub mod handlers;
pub mod logic;
pub mod routes;

pub use handlers::SiteState;
pub use routes::routes;
