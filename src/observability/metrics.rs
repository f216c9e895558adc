use anyhow::Result;
use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::info;

// Declare the static OnceCell to hold the Metrics.
static METRICS_INSTANCE: OnceCell<Arc<Metrics>> = OnceCell::const_new();

/// Asynchronously initializes and gets a reference to the static `Metrics`.
pub async fn get_metrics() -> &'static Arc<Metrics> {
    METRICS_INSTANCE.get_or_init(|| async {
        info!("Initializing Metrics ...");
        Metrics::new()}
    ).await
}

/// Render every registered metric in the Prometheus text format.
pub async fn gather_text() -> Result<String> {
    let metrics = get_metrics().await;
    let mut buffer = Vec::new();
    TextEncoder::new().encode(&metrics.registry.gather(), &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

#[derive(Clone)]
pub struct Metrics {
    pub registry: Registry,

    // Token endpoint metrics
    pub token_requests: IntCounterVec,
    pub token_request_failures: IntCounterVec,
    pub token_request_duration: HistogramVec,

    // Cache metrics
    pub cache_lookups: IntCounterVec,
    pub cache_write_failures: IntCounter,

    // Config
    pub config_validation_errors: IntCounter,
}

impl Metrics {
    fn new() -> Arc<Self> {
        let registry = Registry::new_custom(Some("redditoauth2".into()), None).unwrap();

        let metrics: Arc<Metrics> = Arc::new(Self {
            // Token endpoint
            token_requests: IntCounterVec::new(Opts::new("token_requests_total", "Token endpoint requests by grant type"), &["grant_type"]).unwrap(),
            token_request_failures: IntCounterVec::new(Opts::new("token_request_failures_total", "Token endpoint failures by reason"), &["reason"]).unwrap(),
            token_request_duration: HistogramVec::new(HistogramOpts::new("token_request_duration_seconds", "Token request duration seconds").buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]), &["grant_type"]).unwrap(),

            // Cache
            cache_lookups: IntCounterVec::new(Opts::new("cache_lookups_total", "Token cache lookups by result"), &["result"]).unwrap(),
            cache_write_failures: IntCounter::new("cache_write_failures_total", "Failed token cache writes").unwrap(),

            config_validation_errors: IntCounter::new("config_validation_errors_total", "Validation errors while loading config").unwrap(),

            registry,
        });

        // Register all metrics in the registry
        let reg = &metrics.registry;
        reg.register(Box::new(metrics.token_requests.clone())).unwrap();
        reg.register(Box::new(metrics.token_request_failures.clone())).unwrap();
        reg.register(Box::new(metrics.token_request_duration.clone())).unwrap();
        reg.register(Box::new(metrics.cache_lookups.clone())).unwrap();
        reg.register(Box::new(metrics.cache_write_failures.clone())).unwrap();
        reg.register(Box::new(metrics.config_validation_errors.clone())).unwrap();

        metrics
    }
}

#[cfg(test)]
mod test {
    use super::{gather_text, get_metrics};

    #[tokio::test]
    async fn registered_metrics_are_rendered() {
        get_metrics().await.token_requests.with_label_values(&["password"]).inc();

        let text = gather_text().await.unwrap();
        assert!(text.contains("redditoauth2_token_requests_total"));
    }
}
