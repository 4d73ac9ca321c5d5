// --- File: crates/folio_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origins allowed to call the public API from a browser.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

// --- Database Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    pub url: String, // e.g. sqlite:data/folio.db, overridable via FOLIO__DATABASE__URL
}

/// A kind of meeting that can be booked, e.g. a 30 minute intro call.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MeetingType {
    pub id: String,
    pub label: String,
    #[serde(alias = "duration_minutes", alias = "durationminutes")]
    pub duration_minutes: i64,
}

/// Booking settings used when no settings document has been persisted yet.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BookingDefaults {
    #[serde(default)]
    pub enabled: bool,
    pub timezone: String,
    #[serde(default)]
    pub meeting_types: Vec<MeetingType>,
}

impl Default for BookingDefaults {
    fn default() -> Self {
        Self {
            enabled: false,
            timezone: "America/Toronto".to_string(),
            meeting_types: vec![MeetingType {
                id: "intro".to_string(),
                label: "Intro call".to_string(),
                duration_minutes: 30,
            }],
        }
    }
}

// --- Booking Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct BookingConfig {
    pub defaults: BookingDefaults,
    /// "HH:MM" in the settings timezone
    pub work_start_time: String,
    /// "HH:MM" in the settings timezone
    pub work_end_time: String,
    /// Three letter weekday names, e.g. "Mon"
    pub working_days: Vec<String>,
    pub default_lookahead_days: u32,
    pub max_lookahead_days: u32,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            defaults: BookingDefaults::default(),
            work_start_time: "09:00".to_string(),
            work_end_time: "17:00".to_string(),
            working_days: ["Mon", "Tue", "Wed", "Thu", "Fri"]
                .iter()
                .map(|d| d.to_string())
                .collect(),
            default_lookahead_days: 14,
            max_lookahead_days: 60,
        }
    }
}

// --- Session Config ---
// Secrets are usually injected with "secret_from_env" markers.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SessionConfig {
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// HS256 key used to sign session cookies
    pub session_secret: String,
    /// HS256 key shared with the identity provider for ID tokens
    pub id_token_secret: String,
    #[serde(default = "default_session_max_age")]
    pub max_age_seconds: i64,
    #[serde(default = "default_true")]
    pub secure_cookie: bool,
    #[serde(default = "default_login_path")]
    pub login_path: String,
}

fn default_cookie_name() -> String {
    "__session".to_string()
}

fn default_session_max_age() -> i64 {
    60 * 60 * 24 * 5
}

fn default_true() -> bool {
    true
}

fn default_login_path() -> String {
    "/admin/login".to_string()
}

// --- Firebase Remote Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FirebaseConfig {
    pub project_id: Option<String>,
    pub key_path: Option<String>,
    /// Remote Config parameter holding the bookings kill switch
    #[serde(default = "default_flag_key")]
    pub booking_flag_key: String,
    /// Overrides the Remote Config REST endpoint (used by tests)
    pub base_url: Option<String>,
}

fn default_flag_key() -> String {
    "bookings_enabled".to_string()
}

// --- CRM Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CrmConfig {
    pub base_url: String,
    pub api_key: String,
}

// --- Transactional Email Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct EmailConfig {
    pub base_url: String,
    pub api_key: String,
    pub from_address: String,
    /// Where booking notifications for the site owner go
    pub owner_address: Option<String>,
}

// --- Google Calendar Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CalendarConfig {
    pub key_path: Option<String>,
    pub calendar_id: Option<String>,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct IntegrationsConfig {
    pub timeout_seconds: u64,
}

impl Default for IntegrationsConfig {
    fn default() -> Self {
        Self { timeout_seconds: 5 }
    }
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,
    pub session: SessionConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_remote_config: bool,
    #[serde(default)]
    pub use_crm: bool,
    #[serde(default)]
    pub use_email: bool,
    #[serde(default)]
    pub use_calendar: bool,

    #[serde(default)]
    pub booking: BookingConfig,
    #[serde(default)]
    pub integrations: IntegrationsConfig,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
    #[serde(default)]
    pub firebase: Option<FirebaseConfig>,
    #[serde(default)]
    pub crm: Option<CrmConfig>,
    #[serde(default)]
    pub email: Option<EmailConfig>,
    #[serde(default)]
    pub calendar: Option<CalendarConfig>,
}

impl AppConfig {
    /// A self-contained configuration with every integration switched off.
    ///
    /// Handy for tests and for running the API locally without credentials.
    pub fn local(session_secret: &str, id_token_secret: &str) -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                allowed_origins: Vec::new(),
            },
            session: SessionConfig {
                cookie_name: default_cookie_name(),
                session_secret: session_secret.to_string(),
                id_token_secret: id_token_secret.to_string(),
                max_age_seconds: default_session_max_age(),
                secure_cookie: false,
                login_path: default_login_path(),
            },
            use_remote_config: false,
            use_crm: false,
            use_email: false,
            use_calendar: false,
            booking: BookingConfig::default(),
            integrations: IntegrationsConfig::default(),
            database: None,
            firebase: None,
            crm: None,
            email: None,
            calendar: None,
        }
    }
}
