use std::fmt;

use crate::utils::constants::{ACCESS_TOKEN_PATH, CACHE_KEY_PREFIX};

/// Credentials the provider exchanges for a token. Immutable once built.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub app_id: String,
    pub app_secret: String,
    pub user_agent: String,
    pub endpoint: String,
    pub grant_type: String,
}

impl Credentials {
    pub fn token_url(&self) -> String {
        format!("{}{}", self.endpoint.trim_end_matches('/'), ACCESS_TOKEN_PATH)
    }

    /// Stable cache key: one entry per reddit application.
    pub fn cache_key(&self) -> String {
        format!("{}{}", CACHE_KEY_PREFIX, self.app_id)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .field("app_id", &self.app_id)
            .field("app_secret", &"***")
            .field("user_agent", &self.user_agent)
            .field("endpoint", &self.endpoint)
            .field("grant_type", &self.grant_type)
            .finish()
    }
}
