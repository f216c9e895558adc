use std::time::Duration;

use tokio::time::sleep;
use tracing::{error, warn};

use crate::config::settings::RetryConfig;
use crate::error::{AttemptError, AuthError};
use crate::utils::constants::{DEFAULT_RETRY_ATTEMPTS, DEFAULT_RETRY_DELAY_MS};

/// Fixed-delay retry policy for transient token request failures.
#[derive(Debug, Clone)]
pub struct RetrySettings {
    pub attempts: u32,
    pub delay: Duration,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            attempts: DEFAULT_RETRY_ATTEMPTS,
            delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
        }
    }
}

impl From<&RetryConfig> for RetrySettings {
    fn from(cfg: &RetryConfig) -> Self {
        Self {
            attempts: cfg.attempts.unwrap_or(DEFAULT_RETRY_ATTEMPTS),
            delay: Duration::from_millis(cfg.delay_ms.unwrap_or(DEFAULT_RETRY_DELAY_MS)),
        }
    }
}

impl RetrySettings {
    /// Run `operation` until it succeeds, fails fatally or the attempt budget
    /// is spent. The operation receives the 1-based attempt number.
    pub(crate) async fn run_with_retry<F, Fut, T>(&self, mut operation: F) -> Result<T, AuthError>
    where
        F: FnMut(u32) -> Fut,
        Fut: std::future::Future<Output = Result<T, AttemptError>>,
    {
        let attempts = self.attempts.max(1);
        let mut last_error = None;

        for attempt in 1..=attempts {
            match operation(attempt).await {
                Ok(value) => return Ok(value),
                Err(AttemptError::Fatal(e)) => {
                    error!("attempt {attempt}/{attempts} failed, not retrying: {e}");
                    return Err(e);
                }
                Err(AttemptError::Transient(e)) if attempt < attempts => {
                    warn!("request for reddit access token has failed, attempt {attempt}/{attempts}: {e:#}");
                    sleep(self.delay).await;
                    last_error = Some(e);
                }
                Err(AttemptError::Transient(e)) => {
                    error!("all {attempt} attempts failed: {e:#}");
                    last_error = Some(e);
                }
            }
        }

        Err(AuthError::RetriesExhausted {
            attempts,
            last_error: last_error.map(|e| format!("{e:#}")).unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod test {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    use anyhow::anyhow;
    use tokio::time::Instant;

    use super::RetrySettings;
    use crate::error::{AttemptError, AuthError};

    fn settings() -> RetrySettings {
        RetrySettings { attempts: 3, delay: Duration::from_secs(5) }
    }

    #[tokio::test(start_paused = true)]
    async fn transient_failures_are_retried_with_fixed_delay() {
        let calls = AtomicU32::new(0);
        let start = Instant::now();

        let value = settings()
            .run_with_retry(|attempt| {
                calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if attempt < 3 {
                        Err(AttemptError::Transient(anyhow!("connection reset")))
                    } else {
                        Ok("token")
                    }
                }
            })
            .await
            .unwrap();

        assert_eq!(value, "token");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(start.elapsed() >= Duration::from_secs(10));
        assert!(start.elapsed() < Duration::from_secs(15));
    }

    #[tokio::test(start_paused = true)]
    async fn budget_exhaustion_reports_last_error() {
        let calls = AtomicU32::new(0);
        let start = Instant::now();

        let err = settings()
            .run_with_retry(|_| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err::<(), _>(AttemptError::Transient(anyhow!("timed out"))) }
            })
            .await
            .unwrap_err();

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        // no sleep after the final attempt
        assert!(start.elapsed() >= Duration::from_secs(10));
        assert!(start.elapsed() < Duration::from_secs(15));
        match err {
            AuthError::RetriesExhausted { attempts, last_error } => {
                assert_eq!(attempts, 3);
                assert!(last_error.contains("timed out"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn fatal_failure_stops_immediately() {
        let calls = AtomicU32::new(0);

        let err = settings()
            .run_with_retry(|_| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err::<(), _>(AttemptError::Fatal(AuthError::InvalidCredentials)) }
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::InvalidCredentials));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
