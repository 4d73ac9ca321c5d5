// --- File: crates/services/folio_backend/src/app_state.rs ---
use crate::service_factory::FolioServiceFactory;
use folio_admin::AdminState;
use folio_auth::{AuthState, JwtIdentityProvider};
use folio_booking::BookingService;
use folio_common::{Clock, FolioError, SystemClock};
use folio_config::AppConfig;
use folio_db::{DbClient, Repositories};
use folio_firebase::RemoteFlagSource;
use folio_integrations::Notifier;
use folio_site::SiteState;
use std::sync::Arc;

/// Everything the routers share.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// `None` when running on the in-memory store
    pub db: Option<DbClient>,
    pub auth: Arc<AuthState>,
    pub bookings: Arc<BookingService>,
    pub site: Arc<SiteState>,
    pub admin: Arc<AdminState>,
}

impl AppState {
    /// Build the live state: storage, remote flag and integrations from
    /// `config`.
    pub async fn new(config: Arc<AppConfig>) -> Result<Self, FolioError> {
        let (repos, db) = FolioServiceFactory::repositories(&config).await?;
        let flag = FolioServiceFactory::flag_source(&config);
        let notifier = FolioServiceFactory::notifier(&config).await;
        Self::from_parts(config, repos, db, flag, notifier, Arc::new(SystemClock))
    }

    /// Assemble the state from prepared parts.
    pub fn from_parts(
        config: Arc<AppConfig>,
        repos: Repositories,
        db: Option<DbClient>,
        flag: Arc<dyn RemoteFlagSource>,
        notifier: Notifier,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, FolioError> {
        let notifier = Arc::new(notifier);
        let identity = Arc::new(JwtIdentityProvider::from_config(&config.session));
        let auth = Arc::new(AuthState::from_config(&config.session, identity));

        let bookings = Arc::new(BookingService::new(
            repos.bookings.clone(),
            flag,
            notifier.clone(),
            clock.clone(),
            config.booking.clone(),
        )?);
        let site = Arc::new(SiteState::new(&repos, notifier, clock.clone()));
        let admin = Arc::new(AdminState {
            bookings: bookings.clone(),
            jobs: repos.jobs.clone(),
            clock,
        });

        Ok(Self {
            config,
            db,
            auth,
            bookings,
            site,
            admin,
        })
    }
}
