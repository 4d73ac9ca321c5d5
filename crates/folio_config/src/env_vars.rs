//! Environment variable naming for the Folio configuration.
//!
//! Plain settings are read from `FOLIO__SECTION__KEY` variables by the
//! `config` crate. Secrets are referenced in config files with the marker
//! string `"secret_from_env"` and resolved from `FOLIO_SECRET_SECTION_KEY`,
//! falling back to the shorter `SECTION_KEY` form.

use std::env;
use tracing::warn;

/// The default prefix for configuration environment variables
pub const DEFAULT_PREFIX: &str = "FOLIO";

/// The prefix for secret environment variables
pub const SECRET_PREFIX: &str = "FOLIO_SECRET";

/// The separator for configuration environment variables
pub const CONFIG_SEPARATOR: &str = "__";

/// The separator for secret environment variables
pub const SECRET_SEPARATOR: &str = "_";

/// Marker value replaced by [`inject_env_vars`]
pub const SECRET_MARKER: &str = "secret_from_env";

/// Get the prefix for configuration environment variables
pub fn get_config_prefix() -> String {
    env::var("PREFIX").unwrap_or_else(|_| DEFAULT_PREFIX.to_string())
}

/// Convert a secret path such as `session.session_secret` to
/// `FOLIO_SECRET_SESSION_SESSION_SECRET`.
pub fn secret_path_to_env_var(path: &str) -> String {
    let path = path.replace('.', SECRET_SEPARATOR);
    format!("{}{}{}", SECRET_PREFIX, SECRET_SEPARATOR, path).to_uppercase()
}

/// Short form without the prefix, e.g. `crm.api_key` -> `CRM_API_KEY`.
pub fn short_secret_path_to_env_var(path: &str) -> String {
    let parts: Vec<&str> = path.split('.').collect();
    if parts.len() < 2 {
        return path.to_uppercase();
    }

    let service = parts[0];
    let key = parts[1..].join(SECRET_SEPARATOR);
    format!("{}_{}", service, key).to_uppercase()
}

/// Look up a secret, preferring the prefixed variable name.
pub fn get_secret_env_var(path: &str) -> Option<String> {
    if let Ok(value) = env::var(secret_path_to_env_var(path)) {
        return Some(value);
    }
    env::var(short_secret_path_to_env_var(path)).ok()
}

/// Recursively replaces `"secret_from_env"` strings with the matching
/// environment variable. Returns `true` when at least one value was replaced.
pub fn inject_env_vars(value: &mut serde_json::Value) -> bool {
    use serde_json::Value;

    fn walk(path: Vec<String>, obj: &mut Value) -> bool {
        let mut replaced = false;

        match obj {
            Value::Object(map) => {
                for (k, v) in map.iter_mut() {
                    let mut new_path = path.clone();
                    new_path.push(k.to_string());
                    replaced |= walk(new_path, v);
                }
            }
            Value::Array(arr) => {
                for (i, v) in arr.iter_mut().enumerate() {
                    let mut new_path = path.clone();
                    new_path.push(i.to_string());
                    replaced |= walk(new_path, v);
                }
            }
            Value::String(s) if s == SECRET_MARKER => {
                let path_str = path.join(".");
                if let Some(env_val) = get_secret_env_var(&path_str) {
                    *s = env_val;
                    replaced = true;
                } else {
                    warn!("env var for secret {} not found", path_str);
                }
            }
            _ => {}
        }

        replaced
    }

    walk(vec![], value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_secret_path_to_env_var() {
        assert_eq!(
            secret_path_to_env_var("session.session_secret"),
            "FOLIO_SECRET_SESSION_SESSION_SECRET"
        );
        assert_eq!(secret_path_to_env_var("crm.api_key"), "FOLIO_SECRET_CRM_API_KEY");
    }

    #[test]
    fn test_short_secret_path_to_env_var() {
        assert_eq!(short_secret_path_to_env_var("crm.api_key"), "CRM_API_KEY");
        assert_eq!(
            short_secret_path_to_env_var("email.api_key"),
            "EMAIL_API_KEY"
        );
        assert_eq!(short_secret_path_to_env_var("token"), "TOKEN");
    }

    #[test]
    fn test_inject_env_vars_replaces_marker() {
        env::set_var("FOLIO_SECRET_TESTSVC_INJECTED_KEY", "s3cr3t");
        let mut value = json!({
            "testsvc": { "injected_key": "secret_from_env", "plain": "keep" }
        });

        assert!(inject_env_vars(&mut value));
        assert_eq!(value["testsvc"]["injected_key"], "s3cr3t");
        assert_eq!(value["testsvc"]["plain"], "keep");
    }

    #[test]
    fn test_inject_env_vars_leaves_missing_marker() {
        let mut value = json!({ "nosuchsvc": { "missing_key": "secret_from_env" } });
        assert!(!inject_env_vars(&mut value));
        assert_eq!(value["nosuchsvc"]["missing_key"], SECRET_MARKER);
    }
}
