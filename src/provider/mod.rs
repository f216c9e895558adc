//! Provider module
//!
//! Exchanges reddit credentials for an access token and keeps it around
//! for as long as it stays valid.

pub mod credentials;
pub mod grant;
pub mod response;
pub mod token_provider;
