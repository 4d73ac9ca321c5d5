//! Runtime feature checks.
//!
//! Each integration has a `use_*` switch in the configuration and an
//! optional section with its settings. It is live only when both are set.

use folio_config::AppConfig;

/// `true` when the switch is on and the feature's config section exists.
pub fn is_feature_enabled<T>(use_feature: bool, feature_config: Option<&T>) -> bool {
    use_feature && feature_config.is_some()
}

pub fn is_remote_config_enabled(config: &AppConfig) -> bool {
    is_feature_enabled(config.use_remote_config, config.firebase.as_ref())
}

pub fn is_crm_enabled(config: &AppConfig) -> bool {
    is_feature_enabled(config.use_crm, config.crm.as_ref())
}

pub fn is_email_enabled(config: &AppConfig) -> bool {
    is_feature_enabled(config.use_email, config.email.as_ref())
}

pub fn is_calendar_enabled(config: &AppConfig) -> bool {
    is_feature_enabled(config.use_calendar, config.calendar.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_config::CrmConfig;

    #[test]
    fn switch_without_section_stays_off() {
        let mut config = AppConfig::local("s", "t");
        config.use_crm = true;
        assert!(!is_crm_enabled(&config));

        config.crm = Some(CrmConfig {
            base_url: "http://localhost".into(),
            api_key: "k".into(),
        });
        assert!(is_crm_enabled(&config));

        config.use_crm = false;
        assert!(!is_crm_enabled(&config));
    }
}
