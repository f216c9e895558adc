#[cfg(test)]
mod test {
    use httpmock::Method::POST;
    use httpmock::MockServer;
    use serde_json::json;

    use crate::cache::memory_cache::MemoryCache;
    use crate::error::AuthError;
    use crate::tests::common::{provider, TOKEN_PATH};

    #[tokio::test]
    async fn invalid_grant_fails_without_retry() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path(TOKEN_PATH);
                then.status(200)
                    .header("Content-Type", "application/json")
                    .json_body(json!({ "error": "invalid_grant" }));
            })
            .await;

        let cache = MemoryCache::new();
        let provider = provider(&server.base_url(), "password", Some(cache.clone()));
        let err = provider.get_access_token().await.unwrap_err();

        assert!(matches!(err, AuthError::InvalidCredentials));
        assert_eq!(err.code(), 1);
        assert_eq!(mock.calls_async().await, 1);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn unauthorized_app_fails_without_retry() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path(TOKEN_PATH);
                then.status(401)
                    .header("Content-Type", "application/json")
                    .json_body(json!({ "message": "Unauthorized", "error": 401 }));
            })
            .await;

        let provider = provider(&server.base_url(), "client_credentials", None);
        let err = provider.get_access_token().await.unwrap_err();

        assert!(matches!(err, AuthError::InvalidAppCredentials));
        assert_eq!(err.code(), 2);
        assert_eq!(mock.calls_async().await, 1);
    }

    #[tokio::test]
    async fn failed_call_does_not_poison_the_provider() {
        let server = MockServer::start_async().await;
        let rejecting = server
            .mock_async(|when, then| {
                when.method(POST).path(TOKEN_PATH);
                then.status(200).json_body(json!({ "error": "invalid_grant" }));
            })
            .await;

        let provider = provider(&server.base_url(), "password", None);
        assert!(provider.get_access_token().await.is_err());

        rejecting.delete_async().await;
        let accepting = server
            .mock_async(|when, then| {
                when.method(POST).path(TOKEN_PATH);
                then.status(200).json_body(json!({
                    "access_token": "second-try",
                    "token_type": "bearer",
                    "expires_in": 3600,
                    "scope": "read"
                }));
            })
            .await;

        let token = provider.get_access_token().await.expect("token after failure");
        assert_eq!(token.access_token, "second-try");
        assert_eq!(accepting.calls_async().await, 1);
    }
}
