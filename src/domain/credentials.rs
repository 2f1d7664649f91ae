//! Submitted credential pair and its structural validation.

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use super::error::{AuthError, AuthResult};

/// Username/password pair awaiting verification.
///
/// Both fields deserialize as optional so a missing field reaches the
/// validator instead of failing inside the body parser.
#[derive(Clone, Default, PartialEq, Eq, Deserialize, Validate, ToSchema)]
pub struct CredentialPair {
    /// Login name
    #[serde(default)]
    #[validate(required, length(min = 1))]
    #[schema(example = "alice")]
    pub username: Option<String>,
    /// Plaintext password (never logged)
    #[serde(default)]
    #[validate(required, length(min = 1))]
    #[schema(example = "correct-horse-battery")]
    pub password: Option<String>,
}

// Don't expose the password in debug output
impl std::fmt::Debug for CredentialPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialPair")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl CredentialPair {
    /// Build a pair with both fields present.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
        }
    }

    /// Borrow `(username, password)` when both are present.
    pub fn fields(&self) -> Option<(&str, &str)> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Some((username.as_str(), password.as_str())),
            _ => None,
        }
    }
}

/// Check a submitted pair for structural validity.
///
/// Fails with [`AuthError::InvalidCredentials`] when the pair itself, the
/// username or the password is absent or empty. Whitespace is not trimmed.
pub fn validate(pair: Option<&CredentialPair>) -> AuthResult<()> {
    let pair = pair.ok_or(AuthError::InvalidCredentials)?;
    Validate::validate(pair).map_err(|_| AuthError::InvalidCredentials)
}
