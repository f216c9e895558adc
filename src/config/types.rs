use serde::Deserialize;

use crate::config::{reddit::RedditConfig, settings::SettingsConfig};

/// ================================
/// Full provider configuration
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    pub reddit: RedditConfig,
    #[serde(default)]
    pub settings: SettingsConfig,
}
