//! Password value object - the stored verifier for a user secret.
//!
//! Hashing happens only when a password is written to the identity store.
//! Login never hashes the submitted secret; it verifies it against the
//! stored PHC string.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::config::MIN_PASSWORD_LENGTH;
use crate::errors::{AppError, AppResult};

/// Argon2 PHC-encoded verifier.
#[derive(Clone, PartialEq, Eq)]
pub struct Password {
    hash: String,
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Hash a new plaintext password with a random salt.
    ///
    /// # Errors
    /// Returns a validation error if the password is shorter than
    /// `MIN_PASSWORD_LENGTH` characters.
    pub fn new(plain_text: &str) -> AppResult<Self> {
        if (plain_text.chars().count() as u64) < MIN_PASSWORD_LENGTH {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hash failed: {}", e)))?
            .to_string();

        Ok(Self { hash })
    }

    /// Wrap a verifier loaded from the database.
    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }

    pub fn into_string(self) -> String {
        self.hash
    }

    /// Check a plaintext secret against this verifier.
    ///
    /// # Errors
    /// Returns an internal error when the stored verifier is not a valid
    /// PHC string; a mismatch is `Ok(false)`.
    pub fn matches(&self, plain_text: &str) -> AppResult<bool> {
        let parsed = PasswordHash::new(&self.hash)
            .map_err(|e| AppError::internal(format!("Invalid hash format: {}", e)))?;

        Ok(Argon2::default()
            .verify_password(plain_text.as_bytes(), &parsed)
            .is_ok())
    }
}
