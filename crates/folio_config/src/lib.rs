use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use serde_json::Value;
use std::env;
use std::path::PathBuf;
use tracing::debug;

pub mod env_vars;
pub mod models;
pub use models::*;

/// Loads the layered application configuration.
///
/// Sources, later ones winning:
/// 1. `config/default.(toml|yaml|json)`
/// 2. `config/{RUN_ENV}.(toml|yaml|json)` (`RUN_ENV` defaults to `debug`)
/// 3. `FOLIO__SECTION__KEY` environment variables
///
/// Afterwards every `"secret_from_env"` marker is resolved from the
/// environment, see [`env_vars::inject_env_vars`].
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let prefix = env_vars::get_config_prefix();
    let config_dir = env::var("CONFIG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config"));

    let default_path = config_dir.join("default");
    let env_path = config_dir.join(&run_env);
    debug!(
        "loading config from {} and {}",
        default_path.display(),
        env_path.display()
    );

    let builder = Config::builder()
        .add_source(File::with_name(&default_path.to_string_lossy()).required(false))
        .add_source(File::with_name(&env_path.to_string_lossy()).required(false))
        .add_source(
            Environment::with_prefix(&prefix)
                .prefix_separator(env_vars::CONFIG_SEPARATOR)
                .separator(env_vars::CONFIG_SEPARATOR)
                .try_parsing(true),
        );

    let raw: Value = builder.build()?.try_deserialize()?;
    config_from_value(raw)
}

/// Resolves secret markers and deserializes a raw configuration tree.
///
/// # Errors
///
/// Fails when the tree does not match [`AppConfig`] or a session secret is
/// empty or still holds the `"secret_from_env"` marker.
pub fn config_from_value(mut raw: Value) -> Result<AppConfig, ConfigError> {
    env_vars::inject_env_vars(&mut raw);
    let config: AppConfig = serde_json::from_value(raw)
        .map_err(|err| ConfigError::Message(format!("invalid configuration: {err}")))?;
    check_session_secrets(&config.session)?;
    Ok(config)
}

// Both HS256 keys must be resolved before the auth layer is built.
fn check_session_secrets(session: &SessionConfig) -> Result<(), ConfigError> {
    let secrets = [
        ("session.session_secret", &session.session_secret),
        ("session.id_token_secret", &session.id_token_secret),
    ];
    for (path, secret) in secrets {
        let secret = secret.trim();
        if secret.is_empty() || secret == env_vars::SECRET_MARKER {
            return Err(ConfigError::Message(format!(
                "{} is not set, export {}",
                path,
                env_vars::secret_path_to_env_var(path)
            )));
        }
    }
    Ok(())
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Loads the dotenv file once per process.
///
/// `DOTENV_OVERRIDE` wins, then a first CLI argument starting with `.env`,
/// then `.env`. Returns the path that was used.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path_override = env::var("DOTENV_OVERRIDE").ok();
    let dotenv_path_arg = env::args().nth(1).filter(|s| s.starts_with(".env"));

    let dotenv_path = dotenv_path_override
        .or(dotenv_path_arg)
        .unwrap_or_else(|| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn minimal_config_fills_defaults() {
        let raw = json!({
            "server": { "host": "0.0.0.0", "port": 3000 },
            "session": { "session_secret": "a", "id_token_secret": "b" }
        });

        let config = config_from_value(raw).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.session.cookie_name, "__session");
        assert!(config.session.secure_cookie);
        assert_eq!(config.booking.max_lookahead_days, 60);
        assert_eq!(config.booking.work_start_time, "09:00");
        assert_eq!(config.integrations.timeout_seconds, 5);
        assert!(!config.use_crm);
        assert!(config.database.is_none());
    }

    #[test]
    fn missing_session_is_rejected() {
        let raw = json!({ "server": { "host": "0.0.0.0", "port": 3000 } });
        assert!(config_from_value(raw).is_err());
    }

    #[test]
    fn unresolved_session_secrets_are_rejected() {
        let raw = json!({
            "server": { "host": "0.0.0.0", "port": 3000 },
            "session": {
                "session_secret": "secret_from_env",
                "id_token_secret": "secret_from_env"
            }
        });

        let err = config_from_value(raw).unwrap_err().to_string();
        assert!(err.contains("session.session_secret"), "{err}");
    }

    #[test]
    fn blank_id_token_secret_is_rejected() {
        let raw = json!({
            "server": { "host": "0.0.0.0", "port": 3000 },
            "session": { "session_secret": "a", "id_token_secret": "  " }
        });

        let err = config_from_value(raw).unwrap_err().to_string();
        assert!(err.contains("FOLIO_SECRET_SESSION_ID_TOKEN_SECRET"), "{err}");
    }

    #[test]
    fn meeting_types_use_camel_case() {
        let raw = json!({
            "server": { "host": "0.0.0.0", "port": 3000 },
            "session": { "session_secret": "a", "id_token_secret": "b" },
            "booking": {
                "defaults": {
                    "enabled": true,
                    "timezone": "Europe/Zurich",
                    "meeting_types": [
                        { "id": "deep-dive", "label": "Deep dive", "durationMinutes": 60 }
                    ]
                }
            }
        });

        let config = config_from_value(raw).unwrap();
        assert_eq!(config.booking.defaults.meeting_types[0].duration_minutes, 60);
        assert_eq!(config.booking.working_days.len(), 5);
    }
}
