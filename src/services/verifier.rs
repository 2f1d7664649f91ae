//! Secret hashing and verification backed by argon2.

use uuid::Uuid;

use crate::config::{ACCOUNT_DISABLED_MESSAGE, ACCOUNT_LOCKED_MESSAGE};
use crate::domain::{AuthError, AuthResult, Password, Principal, User};
use crate::errors::AppResult;

use super::auth_service::CredentialAuthenticator;

/// One-way encoder for secrets written to the identity store.
pub trait SecretHasher: Send + Sync {
    fn hash(&self, plain_text: &str) -> AppResult<String>;
}

/// Argon2id hasher with a random salt per secret.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Hasher;

impl SecretHasher for Argon2Hasher {
    fn hash(&self, plain_text: &str) -> AppResult<String> {
        Password::new(plain_text).map(Password::into_string)
    }
}

/// Checks a raw secret against the identity's stored argon2 verifier,
/// then the account status flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordAuthenticator;

impl CredentialAuthenticator for PasswordAuthenticator {
    fn authenticate(&self, identity: &User, secret: &str) -> AuthResult<Principal> {
        let verifier = Password::from_hash(identity.password_hash.as_str());
        let matched = verifier.matches(secret).map_err(|e| {
            tracing::error!(user_id = %identity.id, "Stored verifier unreadable: {:?}", e);
            AuthError::internal(e.to_string())
        })?;

        if !matched {
            return Err(AuthError::bad_credentials());
        }
        // Status is only disclosed to a caller that proved the secret.
        if !identity.enabled {
            return Err(AuthError::failed(ACCOUNT_DISABLED_MESSAGE));
        }
        if identity.locked {
            return Err(AuthError::failed(ACCOUNT_LOCKED_MESSAGE));
        }

        Ok(Principal::for_user(identity))
    }
}

/// Argon2 verifier for a random secret nobody knows.
///
/// Checked against the submitted password when a username has no record,
/// so unknown and known usernames cost the same argon2 work.
pub struct DecoyVerifier {
    verifier: Option<Password>,
}

impl DecoyVerifier {
    pub fn new() -> Self {
        let verifier = Password::new(&Uuid::new_v4().to_string())
            .map_err(|e| {
                tracing::warn!("Decoy verifier unavailable: {:?}", e);
                e
            })
            .ok();
        Self { verifier }
    }

    /// Run one verification against the decoy; it never matches.
    ///
    /// Returns whether any argon2 work was done.
    pub fn spend(&self, secret: &str) -> bool {
        match &self.verifier {
            Some(verifier) => {
                let _ = verifier.matches(secret);
                true
            }
            None => false,
        }
    }
}

impl Default for DecoyVerifier {
    fn default() -> Self {
        Self::new()
    }
}
