//! Persistence for Folio
//!
//! Narrow repository traits (see [`repository`]) with two implementations:
//! SQL through a `sqlx::Any` pool and an in-memory store. The backend picks
//! SQL when a `[database]` section is configured.
//!
//! ```rust,no_run
//! use folio_db::{DbClient, Repositories};
//!
//! async fn setup() -> Result<Repositories, folio_db::DbError> {
//!     let client = DbClient::from_url("sqlite:data/folio.db").await?;
//!     Repositories::sql(client).await
//! }
//! ```

pub mod client;
pub mod error;
pub mod repositories;
pub mod repository;
pub mod schema;


pub use client::DbClient;
pub use error::DbError;
pub use repositories::{InMemoryStore, SqlBookingRepository, SqlJobRepository, SqlSiteRepository};
pub use repository::{
    AnalyticsRepository, BookingRepository, ContactRepository, JobRepository, Repositories,
    SubscriberRepository,
};
