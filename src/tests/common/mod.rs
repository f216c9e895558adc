// tests/common/mod.rs
pub use axum::Router;
pub use serde_json::json;
pub use tokio::task::JoinHandle;

use std::net::SocketAddr;
use std::time::Duration;

use serde_json::Value;

use crate::cache::memory_cache::MemoryCache;
use crate::provider::credentials::Credentials;
use crate::provider::token_provider::TokenProvider;
use crate::resilience::retry::RetrySettings;

pub const TOKEN_PATH: &str = "/api/v1/access_token";
pub const APP_ID: &str = "my-app";
pub const USER_AGENT: &str = "reddit-oauth2-tests/1.0";
/// base64("my-app:my-secret")
pub const BASIC_AUTH: &str = "Basic bXktYXBwOm15LXNlY3JldA==";
pub const RETRY_DELAY: Duration = Duration::from_millis(50);

/// Spawn an Axum router on an ephemeral port and return (JoinHandle, SocketAddr)
pub async fn spawn_axum(router: Router) -> (JoinHandle<()>, SocketAddr) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server failed");
    });
    (handle, addr)
}

pub fn credentials(endpoint: &str, grant_type: &str) -> Credentials {
    Credentials {
        username: "bot".to_owned(),
        password: "hunter2".to_owned(),
        app_id: APP_ID.to_owned(),
        app_secret: "my-secret".to_owned(),
        user_agent: USER_AGENT.to_owned(),
        endpoint: endpoint.to_owned(),
        grant_type: grant_type.to_owned(),
    }
}

/// Same attempt budget as production, shorter pause.
pub fn fast_retry() -> RetrySettings {
    RetrySettings { attempts: 3, delay: RETRY_DELAY }
}

pub fn provider(endpoint: &str, grant_type: &str, cache: Option<MemoryCache>) -> TokenProvider<MemoryCache> {
    TokenProvider::new(credentials(endpoint, grant_type), cache)
        .expect("provider")
        .with_retry(fast_retry())
}

pub fn success_body(access_token: &str, expires_in: u64) -> Value {
    json!({
        "access_token": access_token,
        "token_type": "bearer",
        "expires_in": expires_in,
        "scope": "*"
    })
}
