use std::{env, fmt, fs};

use anyhow::{anyhow, Context, Result};
use serde::{de, Deserialize, Deserializer};
use serde_yaml::Value;

use crate::provider::credentials::Credentials;
use crate::utils::constants::{DEFAULT_ENDPOINT, DEFAULT_USER_AGENT, GRANT_TYPE_PASSWORD};

/// ================================
/// Reddit application and account
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct RedditConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub username: String,
    pub password: Option<SecretValue>,
    pub app_id: String,
    pub app_secret: SecretValue,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// allowed: password, client_credentials
    #[serde(default = "default_grant_type")]
    pub grant_type: String,
}

impl RedditConfig {
    /// Resolve secrets and produce the credentials the provider owns.
    pub fn to_credentials(&self) -> Result<Credentials> {
        let password = match &self.password {
            Some(secret) => secret.resolve().context("resolving reddit.password")?,
            None => String::new(),
        };
        let app_secret = self.app_secret.resolve().context("resolving reddit.app_secret")?;

        Ok(Credentials {
            username: self.username.to_owned(),
            password,
            app_id: self.app_id.to_owned(),
            app_secret,
            user_agent: self.user_agent.to_owned(),
            endpoint: self.endpoint.to_owned(),
            grant_type: self.grant_type.to_owned(),
        })
    }
}

/// Secret value sources
#[derive(Deserialize, Clone)]
#[serde(untagged)]
pub enum SecretValue {
    Plain(#[serde(deserialize_with = "scalar_to_string")] String),
    Literal {
        #[serde(deserialize_with = "scalar_to_string")]
        value: String,
    },
    FromEnv {
        from_env: String,
    },
    FromFile {
        path: String,
    },
}

impl SecretValue {
    pub fn resolve(&self) -> Result<String> {
        match self {
            SecretValue::Plain(value) | SecretValue::Literal { value } => Ok(value.to_owned()),
            SecretValue::FromEnv { from_env } => env::var(from_env)
                .map_err(|err| anyhow!("env var '{}': {}", from_env, err)),
            SecretValue::FromFile { path } => fs::read_to_string(path)
                .map(|res| res.trim().to_string())
                .with_context(|| format!("reading secret file '{}'", path)),
        }
    }
}

impl fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecretValue::Plain(_) | SecretValue::Literal { .. } => f.write_str("Literal(***)"),
            SecretValue::FromEnv { from_env } => write!(f, "FromEnv({})", from_env),
            SecretValue::FromFile { path } => write!(f, "FromFile({})", path),
        }
    }
}

/// YAML reads an all-digit secret as a number; keep its text.
fn scalar_to_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(value) => Ok(value),
        Value::Number(value) => Ok(value.to_string()),
        Value::Bool(value) => Ok(value.to_string()),
        _ => Err(de::Error::custom("expected a string or number secret")),
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_grant_type() -> String {
    GRANT_TYPE_PASSWORD.to_string()
}
