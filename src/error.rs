//! Authentication failures surfaced by the token provider.

/// Fatal outcome of `TokenProvider::get_access_token`.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("unsupported grant type '{0}', expected 'password' or 'client_credentials'")]
    InvalidGrantType(String),
    #[error("supplied reddit username/password are invalid or the threshold for invalid logins has been exceeded")]
    InvalidCredentials,
    #[error("supplied reddit app ID/secret are invalid")]
    InvalidAppCredentials,
    #[error("failed to get reddit access token after {attempts} attempts, check your connection and/or reddit service status: {last_error}")]
    RetriesExhausted { attempts: u32, last_error: String },
}

impl AuthError {
    /// Stable numeric code, handy for process exit statuses.
    pub fn code(&self) -> i32 {
        match self {
            AuthError::InvalidCredentials => 1,
            AuthError::InvalidAppCredentials => 2,
            AuthError::RetriesExhausted { .. } => 3,
            AuthError::InvalidGrantType(_) => 4,
        }
    }
}

/// Outcome of a single token request.
#[derive(Debug)]
pub(crate) enum AttemptError {
    /// The endpoint rejected the credentials; retrying cannot help.
    Fatal(AuthError),
    /// Network trouble, a malformed body or an unrecognized error field.
    Transient(anyhow::Error),
}

impl From<reqwest::Error> for AttemptError {
    fn from(err: reqwest::Error) -> Self {
        AttemptError::Transient(err.into())
    }
}

impl From<AuthError> for AttemptError {
    fn from(err: AuthError) -> Self {
        AttemptError::Fatal(err)
    }
}
