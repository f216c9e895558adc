use anyhow::Result;
use clap::ValueEnum;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::settings::{LogFormat, LoggingConfig};
use crate::config::types::ServiceConfig;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    TRACE,
    DEBUG,
    INFO,
    WARN,
    ERROR,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match *self {
            LogLevel::TRACE => "trace",
            LogLevel::DEBUG => "debug",
            LogLevel::INFO => "info",
            LogLevel::WARN => "warn",
            LogLevel::ERROR => "error",
        }
    }
}

/// Resolve the logging config: the CLI level wins over the file, the file
/// over the defaults.
pub fn resolve_logging_config(service_config: &ServiceConfig, arg_log_level: Option<LogLevel>) -> LoggingConfig {
    let config = service_config.settings.logging.clone().unwrap_or_default();
    match arg_log_level {
        Some(level) => LoggingConfig::new(level.as_str().to_owned(), config.format),
        None => config,
    }
}

pub fn run(service_config: &ServiceConfig, arg_log_level: Option<LogLevel>) -> Result<()> {
    init_logging(&resolve_logging_config(service_config, arg_log_level));
    Ok(())
}

/// Initialize tracing with the desired config.
pub fn init_logging(cfg: &LoggingConfig) {
    let env_filter = EnvFilter::try_new(&cfg.level).unwrap_or_else(|_| EnvFilter::new("info"));

    // Base layer: filter + writer
    let registry = tracing_subscriber::registry().with(env_filter);

    // Choose format layer
    match cfg.format {
        LogFormat::Json => {
            let layer = fmt::layer()
                .json()
                .with_timer(UtcTime::rfc_3339())
                .flatten_event(true) // flattens fields, good for CRI log parsers
                .with_ansi(false) // CRI parsers dislike ANSI color codes
                .with_writer(std::io::stderr);

            let _ = registry.with(layer).try_init();
        }
        LogFormat::Compact => {
            let layer = fmt::layer()
                .compact()
                .with_timer(UtcTime::rfc_3339())
                .with_ansi(true)
                .with_writer(std::io::stderr);

            let _ = registry.with(layer).try_init();
        }
    };
}

#[cfg(test)]
mod test {
    use super::{resolve_logging_config, LogLevel};
    use crate::config::reddit::{RedditConfig, SecretValue};
    use crate::config::settings::{LogFormat, LoggingConfig, SettingsConfig};
    use crate::config::types::ServiceConfig;

    fn service_config(logging: Option<LoggingConfig>) -> ServiceConfig {
        ServiceConfig {
            reddit: RedditConfig {
                endpoint: "https://www.reddit.com".into(),
                username: String::new(),
                password: None,
                app_id: "app".into(),
                app_secret: SecretValue::Plain("secret".into()),
                user_agent: "bot/1.0".into(),
                grant_type: "client_credentials".into(),
            },
            settings: SettingsConfig { logging, ..Default::default() },
        }
    }

    #[test]
    fn cli_level_overrides_file_level() {
        let cfg = service_config(Some(LoggingConfig::new("warn".into(), LogFormat::Json)));

        let from_file = resolve_logging_config(&cfg, None);
        assert_eq!(from_file.level, "warn");

        let from_cli = resolve_logging_config(&cfg, Some(LogLevel::DEBUG));
        assert_eq!(from_cli.level, "debug");
        assert_eq!(from_cli.format, LogFormat::Json);
    }

    #[test]
    fn defaults_apply_without_logging_section() {
        let resolved = resolve_logging_config(&service_config(None), None);
        assert_eq!(resolved.level, "info");
        assert_eq!(resolved.format, LogFormat::Compact);
    }
}
