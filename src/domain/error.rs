//! Login failure taxonomy.
//!
//! These are the only outcomes the authentication orchestrator reports.
//! They carry no infrastructure detail; `Internal` messages are logged
//! and never shown to the caller.

use thiserror::Error;

use crate::config::{BAD_CREDENTIALS_MESSAGE, MISSING_CREDENTIALS_MESSAGE, USER_NOT_FOUND_MESSAGE};

/// Errors produced while authenticating a credential pair.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Pair, username or password missing or empty
    #[error("{}", MISSING_CREDENTIALS_MESSAGE)]
    InvalidCredentials,

    /// No identity record for the submitted username
    #[error("{}", USER_NOT_FOUND_MESSAGE)]
    UserNotFound,

    /// The authenticator rejected the secret (message comes from it)
    #[error("{0}")]
    AuthenticationFailed(String),

    /// Anything unanticipated (lookup outage, corrupt verifier, ...)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Secret did not match the stored verifier
    pub fn bad_credentials() -> Self {
        AuthError::AuthenticationFailed(BAD_CREDENTIALS_MESSAGE.to_string())
    }

    /// Authentication failure with an authenticator-supplied message
    pub fn failed(msg: impl Into<String>) -> Self {
        AuthError::AuthenticationFailed(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        AuthError::Internal(msg.into())
    }
}

/// Result type alias for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;
