use std::path::Path;

use anyhow::{anyhow, Context, Result};
use regex::{Captures, Regex};
use tracing::{debug, error};

use crate::config::types::ServiceConfig;
use crate::config::validator::validate_service_config;
use crate::observability::metrics::get_metrics;

/// Load and validate config from YAML file
pub async fn file_to_config(path: &Path) -> Result<ServiceConfig> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading config {}", path.display()))?;
    parse_config(&content).await
}

/// Expand `${VAR}` / `${VAR:default}`, parse YAML and validate.
pub async fn parse_config(content: &str) -> Result<ServiceConfig> {
    let metrics = get_metrics().await;
    let expanded = expand_env_vars(content)?;

    let service_config: ServiceConfig = serde_yaml::from_str(&expanded).inspect_err(|e| {
        error!("parse config error: {}", e);
        metrics.config_validation_errors.inc();
    })?;

    debug!("validation config ...");
    validate_service_config(&service_config).map_err(|errors| {
        metrics.config_validation_errors.inc_by(errors.len() as u64);
        anyhow!("config is not valid:\n - {}", errors.join("\n - "))
    })?;

    Ok(service_config)
}

fn expand_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{(\w+)(?::([^\}]+))?\}")?;
    Ok(re
        .replace_all(input, |caps: &Captures| {
            let var = &caps[1];
            let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");
            std::env::var(var).unwrap_or_else(|_| default.to_string())
        })
        .to_string())
}

#[cfg(test)]
mod test {
    use super::expand_env_vars;
    use serial_test::serial;

    #[test]
    #[serial]
    fn env_placeholders_are_expanded_with_defaults() {
        std::env::set_var("REDDIT_OAUTH2_TEST_APP", "app-from-env");
        let out = expand_env_vars("app_id: ${REDDIT_OAUTH2_TEST_APP}\nagent: ${REDDIT_OAUTH2_TEST_UNSET:bot/1.0}").unwrap();
        std::env::remove_var("REDDIT_OAUTH2_TEST_APP");

        assert_eq!(out, "app_id: app-from-env\nagent: bot/1.0");
    }
}
