//! # Reddit OAuth2 Token Library
//!
//! Obtains a bearer token for the reddit API through the password or
//! client-credentials grant, caches it for its validity window and
//! refreshes it transparently on expiry or cache miss.
//!
//! Modules:
//! - `config`: YAML configuration, secrets and validation
//! - `cache`: token model and cache backends (file, memory)
//! - `provider`: the token provider and the token endpoint contract
//! - `resilience`: fixed-delay retry for transient failures

pub mod cache;
pub mod config;
pub mod error;
pub mod helpers;
pub mod observability;
pub mod provider;
pub mod resilience;
pub mod utils;

#[cfg(test)]
pub mod tests;

pub use crate::cache::store::{CacheDriver, TokenStore};
pub use crate::cache::token::{AccessToken, CachedToken, Token};
pub use crate::config::types::ServiceConfig;
pub use crate::error::AuthError;
pub use crate::provider::credentials::Credentials;
pub use crate::provider::grant::GrantType;
pub use crate::provider::token_provider::TokenProvider;
