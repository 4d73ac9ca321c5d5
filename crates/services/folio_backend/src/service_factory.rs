//! Builds the services the routers depend on from [`AppConfig`].
//!
//! Every outbound integration is only constructed when its `use_*` flag is
//! set and its section is configured. A live integration that cannot be
//! constructed is logged and left disabled so the site still starts.

use folio_common::features::{
    is_calendar_enabled, is_crm_enabled, is_email_enabled, is_remote_config_enabled,
};
use folio_common::{create_client, log_result};
use folio_config::AppConfig;
use folio_db::{DbClient, DbError, Repositories};
use folio_firebase::{FirebaseFlagSource, RemoteConfigClient, RemoteFlagSource, StaticFlag};
use folio_integrations::{
    CalendarInviter, GoogleCalendarInviter, HttpCrmClient, HttpMailer, Integration, LeadSink,
    Mailer, Notifier,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

pub struct FolioServiceFactory;

impl FolioServiceFactory {
    /// SQL repositories when `[database]` is configured, in-memory otherwise.
    pub async fn repositories(
        config: &AppConfig,
    ) -> Result<(Repositories, Option<DbClient>), DbError> {
        match config.database.as_ref() {
            Some(db_config) => {
                info!("ℹ️ Connecting to database {}", db_config.url);
                let client = log_result(
                    DbClient::from_config(db_config).await,
                    "Database connection failed",
                )?;
                let repos = log_result(
                    Repositories::sql(client.clone()).await,
                    "Database schema setup failed",
                )?;
                Ok((repos, Some(client)))
            }
            None => {
                warn!("No [database] configured, data is kept in memory only");
                Ok((Repositories::in_memory(), None))
            }
        }
    }

    pub fn flag_source(config: &AppConfig) -> Arc<dyn RemoteFlagSource> {
        if !is_remote_config_enabled(config) {
            return Arc::new(StaticFlag(None));
        }
        let Some(firebase) = config.firebase.as_ref() else {
            return Arc::new(StaticFlag(None));
        };

        let client = match create_client(config.integrations.timeout_seconds) {
            Ok(client) => client,
            Err(e) => {
                warn!("Remote Config HTTP client unavailable: {}", e);
                return Arc::new(StaticFlag(None));
            }
        };

        match RemoteConfigClient::from_config(client, firebase) {
            Ok(remote) => {
                info!("ℹ️ Reading the bookings flag from Remote Config");
                Arc::new(FirebaseFlagSource::new(
                    remote,
                    firebase.booking_flag_key.clone(),
                ))
            }
            Err(e) => {
                warn!("Remote Config disabled: {}", e);
                Arc::new(StaticFlag(None))
            }
        }
    }

    pub async fn notifier(config: &AppConfig) -> Notifier {
        let timeout = Duration::from_secs(config.integrations.timeout_seconds);
        let client = match create_client(config.integrations.timeout_seconds) {
            Ok(client) => Some(client),
            Err(e) => {
                warn!("Integration HTTP client unavailable: {}", e);
                None
            }
        };

        let crm: Integration<Arc<dyn LeadSink>> = match (&client, config.crm.as_ref()) {
            (Some(client), Some(crm)) if is_crm_enabled(config) => {
                info!("ℹ️ CRM integration enabled");
                Integration::Live(Arc::new(HttpCrmClient::new(client.clone(), crm)))
            }
            _ => Integration::Disabled,
        };

        let mailer: Integration<Arc<dyn Mailer>> = match (&client, config.email.as_ref()) {
            (Some(client), Some(email)) if is_email_enabled(config) => {
                info!("ℹ️ Email integration enabled");
                Integration::Live(Arc::new(HttpMailer::new(client.clone(), email)))
            }
            _ => Integration::Disabled,
        };

        let calendar: Integration<Arc<dyn CalendarInviter>> = match config.calendar.as_ref() {
            Some(calendar) if is_calendar_enabled(config) => {
                match GoogleCalendarInviter::from_config(calendar).await {
                    Ok(inviter) => {
                        info!("ℹ️ Calendar integration enabled");
                        Integration::Live(Arc::new(inviter))
                    }
                    Err(e) => {
                        warn!("Calendar integration disabled: {}", e);
                        Integration::Disabled
                    }
                }
            }
            _ => Integration::Disabled,
        };

        let owner = config.email.as_ref().and_then(|e| e.owner_address.clone());
        Notifier::new(crm, mailer, calendar, timeout).with_owner_address(owner)
    }
}
