use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::cache::store::{CacheDriver, TokenStore};
use crate::cache::token::{AccessToken, Token};
use crate::config::types::ServiceConfig;
use crate::error::{AttemptError, AuthError};
use crate::helpers::time::get_instant;
use crate::observability::metrics::get_metrics;
use crate::provider::credentials::Credentials;
use crate::provider::grant::GrantType;
use crate::provider::response::parse_token_response;
use crate::resilience::retry::RetrySettings;
use crate::utils::constants::{CONNECT_TIMEOUT_SECS, DEFAULT_CACHE_MAX_TTL_SECS, REQUEST_TIMEOUT_SECS};

static CACHE_HIT: &str = "hit";
static CACHE_MISS: &str = "miss";
static CACHE_ERROR: &str = "error";

/// Reddit OAuth2 access-token provider.
///
/// Serves tokens cache-first: a configured `TokenStore` is consulted on every
/// call, then the token held in memory, and only when both come up empty or
/// expired is the token endpoint asked for a new one. Concurrent callers are
/// not coalesced; each may run its own request.
pub struct TokenProvider<S = CacheDriver> {
    credentials: Credentials,
    client: Client,
    store: Option<S>,
    retry: RetrySettings,
    max_cache_ttl: Duration,
    cache_key: String,
    token: RwLock<Option<Token>>,
}

/// HTTP client with the token endpoint's timeouts and the configured user agent.
pub fn build_http_client(user_agent: &str) -> Result<Client> {
    Client::builder()
        .user_agent(user_agent)
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .context("Failed to build HTTP client")
}

impl TokenProvider<CacheDriver> {
    /// Build credentials, cache driver and retry policy from a loaded config.
    pub fn from_config(cfg: &ServiceConfig) -> Result<Self> {
        let credentials = cfg.reddit.to_credentials()?;
        let cache_cfg = &cfg.settings.cache;
        let store = match cache_cfg.enabled {
            true => Some(CacheDriver::from_config(cache_cfg)?),
            false => None,
        };
        if let Some(driver) = &store {
            info!("token cache enabled, driver '{}'", driver.name());
        }

        Ok(TokenProvider::new(credentials, store)?
            .with_retry(RetrySettings::from(&cfg.settings.retry))
            .with_max_cache_ttl(Duration::from_secs(cache_cfg.max_ttl_seconds())))
    }
}

impl<S> TokenProvider<S>
where
    S: TokenStore + Send + Sync,
{
    pub fn new(credentials: Credentials, store: Option<S>) -> Result<Self> {
        let client = build_http_client(&credentials.user_agent)?;
        let cache_key = credentials.cache_key();
        Ok(Self {
            credentials,
            client,
            store,
            retry: RetrySettings::default(),
            max_cache_ttl: Duration::from_secs(DEFAULT_CACHE_MAX_TTL_SECS),
            cache_key,
            token: RwLock::new(None),
        })
    }

    pub fn with_retry(mut self, retry: RetrySettings) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_max_cache_ttl(mut self, max_cache_ttl: Duration) -> Self {
        self.max_cache_ttl = max_cache_ttl;
        self
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn cache_key(&self) -> &str {
        &self.cache_key
    }

    /// Scope granted to the token currently held, if any.
    pub async fn scope(&self) -> Option<String> {
        self.token.read().await.as_ref().map(|t| t.scope.to_owned())
    }

    /// Return a token usable in an `Authorization` header.
    ///
    /// A cache hit is adopted as-is: stores never return entries past their
    /// ttl and the ttl never outlives the token.
    pub async fn get_access_token(&self) -> Result<AccessToken, AuthError> {
        if let Some(cached) = self.read_cached_token().await {
            debug!("using cached token, expires at {}", cached.expiration);
            let access = cached.access();
            *self.token.write().await = Some(cached);
            return Ok(access);
        }

        let held = self.token.read().await.clone().filter(Token::is_valid);
        if let Some(token) = held {
            debug!("using held token, expires at {}", token.expiration);
            return Ok(token.access());
        }

        let token = self.request_access_token().await?;
        let access = token.access();
        *self.token.write().await = Some(token);
        Ok(access)
    }

    async fn read_cached_token(&self) -> Option<Token> {
        let store = self.store.as_ref()?;
        let metrics = get_metrics().await;
        match store.get(&self.cache_key).await {
            Ok(Some(token)) => {
                metrics.cache_lookups.with_label_values(&[CACHE_HIT]).inc();
                Some(token)
            }
            Ok(None) => {
                metrics.cache_lookups.with_label_values(&[CACHE_MISS]).inc();
                debug!("no cached token for '{}'", self.cache_key);
                None
            }
            Err(err) => {
                metrics.cache_lookups.with_label_values(&[CACHE_ERROR]).inc();
                warn!("reading cached token '{}' failed, treating as miss: {:#}", self.cache_key, err);
                None
            }
        }
    }

    /// Acquire a fresh token from the endpoint and write it through to the cache.
    async fn request_access_token(&self) -> Result<Token, AuthError> {
        let grant: GrantType = self.credentials.grant_type.parse()?;
        info!(
            "requesting reddit access token, grant_type '{}', app_id '{}'",
            grant.as_str(),
            self.credentials.app_id
        );

        let token = self
            .retry
            .run_with_retry(|attempt| self.send_token_request(grant, attempt))
            .await?;
        info!("reddit access token acquired, expires in {} seconds", token.remaining_seconds());

        self.write_cached_token(&token).await;
        Ok(token)
    }

    async fn send_token_request(&self, grant: GrantType, attempt: u32) -> Result<Token, AttemptError> {
        let metrics = get_metrics().await;
        let start = get_instant();
        metrics.token_requests.with_label_values(&[grant.as_str()]).inc();

        let result = self.post_token_request(grant, attempt).await;

        metrics
            .token_request_duration
            .with_label_values(&[grant.as_str()])
            .observe(start.elapsed().as_secs_f64());
        if let Err(err) = &result {
            let reason = match err {
                AttemptError::Fatal(AuthError::InvalidCredentials) => "invalid_grant",
                AttemptError::Fatal(AuthError::InvalidAppCredentials) => "invalid_app_credentials",
                AttemptError::Fatal(_) => "fatal",
                AttemptError::Transient(_) => "transient",
            };
            metrics.token_request_failures.with_label_values(&[reason]).inc();
        }
        result
    }

    async fn post_token_request(&self, grant: GrantType, attempt: u32) -> Result<Token, AttemptError> {
        let creds = &self.credentials;
        debug!("POST {} attempt {}", creds.token_url(), attempt);

        let response = self
            .client
            .post(creds.token_url())
            .basic_auth(&creds.app_id, Some(&creds.app_secret))
            .form(&grant.form_params(creds))
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        debug!("token endpoint responded with status {}", status);

        parse_token_response(&body)
    }

    async fn write_cached_token(&self, token: &Token) {
        let Some(store) = &self.store else {
            return;
        };
        let ttl = Duration::from_secs(token.remaining_seconds()).min(self.max_cache_ttl);
        if ttl.is_zero() {
            debug!("token has no remaining lifetime, not caching");
            return;
        }
        if let Err(err) = store.put(&self.cache_key, token, ttl).await {
            get_metrics().await.cache_write_failures.inc();
            warn!("caching token '{}' failed: {:#}", self.cache_key, err);
        }
    }
}
