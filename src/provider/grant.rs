use std::str::FromStr;

use crate::error::AuthError;
use crate::provider::credentials::Credentials;
use crate::utils::constants::{GRANT_TYPE_CLIENT_CREDENTIALS, GRANT_TYPE_PASSWORD};

/// OAuth2 credential-exchange flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantType {
    /// exchanges the account's username and password
    Password,
    /// exchanges only the application credentials
    ClientCredentials,
}

impl GrantType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GrantType::Password => GRANT_TYPE_PASSWORD,
            GrantType::ClientCredentials => GRANT_TYPE_CLIENT_CREDENTIALS,
        }
    }

    /// Form body of the token request.
    pub fn form_params<'a>(&self, credentials: &'a Credentials) -> Vec<(&'static str, &'a str)> {
        match self {
            GrantType::Password => vec![
                ("grant_type", GRANT_TYPE_PASSWORD),
                ("username", credentials.username.as_str()),
                ("password", credentials.password.as_str()),
            ],
            GrantType::ClientCredentials => vec![("grant_type", GRANT_TYPE_CLIENT_CREDENTIALS)],
        }
    }
}

impl FromStr for GrantType {
    type Err = AuthError;

    /// An empty value selects the password flow.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | GRANT_TYPE_PASSWORD => Ok(GrantType::Password),
            GRANT_TYPE_CLIENT_CREDENTIALS => Ok(GrantType::ClientCredentials),
            other => Err(AuthError::InvalidGrantType(other.to_owned())),
        }
    }
}
