//! Configuration validation with aggregated errors.
//! - Aggregates all issues into Vec<String>
//! - Checks credentials against the selected grant type
//! - Checks cache driver, retry and logging invariants

use tracing::{error, info};

use crate::config::reddit::RedditConfig;
use crate::config::settings::SettingsConfig;
use crate::config::types::ServiceConfig;
use crate::provider::grant::GrantType;
use crate::utils::constants::{CACHE_DRIVER_FILE, CACHE_DRIVER_MEMORY};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Public entrypoint: returns Ok(()) or Err(Vec<String>) containing all issues.
pub fn validate_service_config(cfg: &ServiceConfig) -> Result<(), Vec<String>> {
    let mut errors: Vec<String> = Vec::new();

    validate_reddit(&cfg.reddit, &mut errors);
    validate_settings(&cfg.settings, &mut errors);

    if errors.is_empty() {
        info!("config is valid");
        Ok(())
    } else {
        for e in &errors {
            error!("config: {}", e);
        }
        Err(errors)
    }
}

fn validate_reddit(reddit: &RedditConfig, errors: &mut Vec<String>) {
    if reddit.app_id.trim().is_empty() {
        errors.push("reddit.app_id must not be empty".to_string());
    }
    if reddit.user_agent.trim().is_empty() {
        errors.push("reddit.user_agent must not be empty".to_string());
    }
    if !(reddit.endpoint.starts_with("http://") || reddit.endpoint.starts_with("https://")) {
        errors.push(format!(
            "reddit.endpoint '{}' must start with http:// or https://",
            reddit.endpoint
        ));
    }

    match reddit.grant_type.parse::<GrantType>() {
        Ok(GrantType::Password) => {
            if reddit.username.trim().is_empty() {
                errors.push("reddit.username is required for grant_type 'password'".to_string());
            }
            if reddit.password.is_none() {
                errors.push("reddit.password is required for grant_type 'password'".to_string());
            }
        }
        Ok(GrantType::ClientCredentials) => {}
        Err(e) => errors.push(format!("reddit.grant_type: {}", e)),
    }
}

fn validate_settings(settings: &SettingsConfig, errors: &mut Vec<String>) {
    let cache = &settings.cache;
    if cache.enabled && cache.driver != CACHE_DRIVER_FILE && cache.driver != CACHE_DRIVER_MEMORY {
        errors.push(format!(
            "settings.cache.driver '{}' is not supported, expected '{}' or '{}'",
            cache.driver, CACHE_DRIVER_FILE, CACHE_DRIVER_MEMORY
        ));
    }
    if cache.max_ttl_seconds == Some(0) {
        errors.push("settings.cache.max_ttl_seconds must be > 0".to_string());
    }

    if settings.retry.attempts == Some(0) {
        errors.push("settings.retry.attempts must be >= 1".to_string());
    }

    if let Some(logging) = &settings.logging {
        if !LOG_LEVELS.contains(&logging.level.to_lowercase().as_str()) {
            errors.push(format!(
                "settings.logging.level '{}' is not one of {:?}",
                logging.level, LOG_LEVELS
            ));
        }
    }
}
