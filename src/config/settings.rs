use serde::Deserialize;

use crate::utils::constants::{CACHE_DRIVER_FILE, DEFAULT_CACHE_MAX_TTL_SECS};

/// ================================
/// Global provider settings
/// ================================
#[derive(Debug, Deserialize, Clone, Default)]
pub struct SettingsConfig {
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub retry: RetryConfig,
    pub logging: Option<LoggingConfig>,
}

/// ================================
/// Token cache
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,
    /// allowed: file, memory
    #[serde(default = "default_cache_driver")]
    pub driver: String,
    /// directory for the file driver, defaults to `<tmp>/reddit-oauth2`
    pub path: Option<String>,
    /// upper bound for the ttl of a cached token,
    /// the token's own lifetime always wins when it is shorter
    pub max_ttl_seconds: Option<u64>,
}

impl CacheConfig {
    pub fn max_ttl_seconds(&self) -> u64 {
        self.max_ttl_seconds.unwrap_or(DEFAULT_CACHE_MAX_TTL_SECS)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
            driver: default_cache_driver(),
            path: None,
            max_ttl_seconds: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct RetryConfig {
    /// total attempts for transient failures
    pub attempts: Option<u32>,
    /// fixed delay between attempts
    pub delay_ms: Option<u64>,
}

/// ================================
/// Logging
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String, // allowed: trace, debug, info, warn, error
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn new(level: String, format: LogFormat) -> Self {
        Self { level, format }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), format: LogFormat::Compact }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Compact,
}

fn default_cache_enabled() -> bool {
    true
}

fn default_cache_driver() -> String {
    CACHE_DRIVER_FILE.to_string()
}
