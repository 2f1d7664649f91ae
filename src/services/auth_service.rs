//! Authentication service - the login orchestrator.
//!
//! Validates the submitted pair, resolves the identity record, hands the raw
//! secret to a credential authenticator and records the resulting principal
//! in the caller's security context. Each step short-circuits on failure and
//! nothing is retried.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{
    credentials, AuthError, AuthResult, CredentialPair, Principal, SecurityContext, User,
};
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Resolves an identity record by username.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait IdentityLookup: Send + Sync {
    /// `Ok(None)` when no record exists; `Err` only for infrastructure failures
    async fn lookup(&self, username: &str) -> AppResult<Option<User>>;
}

/// Compares a submitted secret against an identity's stored verifier.
///
/// The single source of truth for secret comparison: it receives the raw
/// secret, never a pre-hashed one.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait CredentialAuthenticator: Send + Sync {
    fn authenticate(&self, identity: &User, secret: &str) -> AuthResult<Principal>;
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Authenticate a credential pair and record the principal in `context`.
    ///
    /// `context` is only written on success.
    async fn authenticate(
        &self,
        pair: Option<&CredentialPair>,
        context: &mut SecurityContext,
    ) -> AuthResult<Principal>;
}

/// Concrete login orchestrator over injected capabilities.
pub struct AuthManager {
    identities: Arc<dyn IdentityLookup>,
    authenticator: Arc<dyn CredentialAuthenticator>,
}

impl AuthManager {
    pub fn new(
        identities: Arc<dyn IdentityLookup>,
        authenticator: Arc<dyn CredentialAuthenticator>,
    ) -> Self {
        Self {
            identities,
            authenticator,
        }
    }
}

#[async_trait]
impl AuthService for AuthManager {
    async fn authenticate(
        &self,
        pair: Option<&CredentialPair>,
        context: &mut SecurityContext,
    ) -> AuthResult<Principal> {
        credentials::validate(pair)?;
        let (username, secret) = pair
            .and_then(CredentialPair::fields)
            .ok_or(AuthError::InvalidCredentials)?;

        let identity = self
            .identities
            .lookup(username)
            .await
            .map_err(|e| {
                tracing::error!(username, "Identity lookup failed: {:?}", e);
                AuthError::internal(e.to_string())
            })?
            .ok_or_else(|| {
                tracing::info!(username, "Login rejected: unknown user");
                AuthError::UserNotFound
            })?;

        let principal = self
            .authenticator
            .authenticate(&identity, secret)
            .map_err(|e| {
                tracing::info!(username, reason = %e, "Login rejected by authenticator");
                e
            })?;

        context.set_principal(principal.clone());
        tracing::info!(username, user_id = %principal.user_id, "Login succeeded");

        Ok(principal)
    }
}
