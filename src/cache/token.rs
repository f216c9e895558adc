use serde::{Deserialize, Serialize};

use crate::helpers::time::{now_i64, seconds_until};

/// Access token held by the provider.
///
/// `expiration` is an absolute UNIX timestamp computed at issue time from
/// the endpoint's `expires_in`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
    pub expiration: i64, // UNIX TIMESTAMP
    pub scope: String,
}

/// The cache persists tokens as-is.
pub type CachedToken = Token;

impl Token {
    pub fn new(access_token: String, token_type: String, expires_in: u64, scope: String) -> Self {
        Self {
            access_token,
            token_type,
            expiration: now_i64().saturating_add(i64::try_from(expires_in).unwrap_or(i64::MAX)),
            scope,
        }
    }

    pub fn is_valid(&self) -> bool {
        now_i64() < self.expiration
    }

    pub fn remaining_seconds(&self) -> u64 {
        seconds_until(self.expiration)
    }

    pub fn access(&self) -> AccessToken {
        AccessToken {
            access_token: self.access_token.to_owned(),
            token_type: self.token_type.to_owned(),
        }
    }
}

/// The pair handed to callers of `get_access_token`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
}

impl AccessToken {
    /// Value for an `Authorization` header, e.g. `bearer abc123`.
    pub fn authorization_header(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }
}
