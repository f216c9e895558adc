use anyhow::anyhow;
use serde::Deserialize;
use serde_json::Value;

use crate::cache::token::Token;
use crate::error::{AttemptError, AuthError};
use crate::utils::constants::{DEFAULT_TOKEN_TYPE, ERROR_INVALID_GRANT, ERROR_UNAUTHORIZED};

/// Body of `/api/v1/access_token`, success and error shapes alike.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    token_type: Option<String>,
    expires_in: Option<u64>,
    scope: Option<String>,
    error: Option<Value>,
}

/// Classify a token endpoint body.
///
/// The HTTP status is not consulted: reddit reports rejected credentials in
/// the `error` field, `"invalid_grant"` for the account and `401` for the
/// application.
pub(crate) fn parse_token_response(body: &str) -> Result<Token, AttemptError> {
    let response: TokenResponse = serde_json::from_str(body)
        .map_err(|e| AttemptError::Transient(anyhow!("token response is not valid JSON: {}", e)))?;

    if let Some(access_token) = response.access_token.filter(|t| !t.is_empty()) {
        let expires_in = response
            .expires_in
            .ok_or_else(|| AttemptError::Transient(anyhow!("token response has no 'expires_in'")))?;
        return Ok(Token::new(
            access_token,
            response.token_type.unwrap_or_else(|| DEFAULT_TOKEN_TYPE.to_owned()),
            expires_in,
            response.scope.unwrap_or_default(),
        ));
    }

    match response.error {
        Some(Value::String(e)) if e == ERROR_INVALID_GRANT => Err(AuthError::InvalidCredentials.into()),
        Some(Value::Number(n)) if n.as_u64() == Some(ERROR_UNAUTHORIZED) => {
            Err(AuthError::InvalidAppCredentials.into())
        }
        Some(other) => Err(AttemptError::Transient(anyhow!("token endpoint returned error {}", other))),
        None => Err(AttemptError::Transient(anyhow!("token response has no 'access_token'"))),
    }
}
