//! Shared constants and invariants

pub const DEFAULT_ENDPOINT: &str = "https://www.reddit.com";
pub const DEFAULT_USER_AGENT: &str = "reddit-oauth2/0.1";
pub const ACCESS_TOKEN_PATH: &str = "/api/v1/access_token";

pub const CONNECT_TIMEOUT_SECS: u64 = 5;
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;
pub const DEFAULT_RETRY_DELAY_MS: u64 = 5000;

pub const CACHE_KEY_PREFIX: &str = "reddit_access_token_";
/// 14 days
pub const DEFAULT_CACHE_MAX_TTL_SECS: u64 = 60 * 60 * 24 * 14;
pub const DEFAULT_FILE_CACHE_DIR: &str = "reddit-oauth2";

// Supported cache drivers
pub const CACHE_DRIVER_FILE: &str = "file";
pub const CACHE_DRIVER_MEMORY: &str = "memory";

// Supported grant types
pub const GRANT_TYPE_PASSWORD: &str = "password";
pub const GRANT_TYPE_CLIENT_CREDENTIALS: &str = "client_credentials";

pub const DEFAULT_TOKEN_TYPE: &str = "bearer";

// Error markers in the token endpoint body
pub const ERROR_INVALID_GRANT: &str = "invalid_grant";
pub const ERROR_UNAUTHORIZED: u64 = 401;
