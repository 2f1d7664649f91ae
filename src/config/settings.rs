//! Application settings loaded from environment variables.

use std::env;
use std::fmt;
use std::str::FromStr;

use super::constants::{
    BAD_CREDENTIALS_MESSAGE, DEFAULT_DATABASE_URL, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
    POLICY_DISTINCT, POLICY_UNIFORM,
};
use crate::domain::AuthError;

/// How an unknown username is reported to the caller.
///
/// `Distinct` answers `400 User not found.`; `Uniform` folds it into the
/// same `401 Bad credentials` a wrong password gets, so usernames cannot
/// be enumerated through the response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownUserPolicy {
    #[default]
    Distinct,
    Uniform,
}

impl UnknownUserPolicy {
    /// Rewrite an orchestrator error according to this policy.
    pub fn apply(self, err: AuthError) -> AuthError {
        match (self, err) {
            (UnknownUserPolicy::Uniform, AuthError::UserNotFound) => {
                AuthError::AuthenticationFailed(BAD_CREDENTIALS_MESSAGE.to_string())
            }
            (_, err) => err,
        }
    }
}

impl FromStr for UnknownUserPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            POLICY_DISTINCT => Ok(UnknownUserPolicy::Distinct),
            POLICY_UNIFORM => Ok(UnknownUserPolicy::Uniform),
            other => Err(format!("unknown login policy '{}'", other)),
        }
    }
}

impl fmt::Display for UnknownUserPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnknownUserPolicy::Distinct => write!(f, "{}", POLICY_DISTINCT),
            UnknownUserPolicy::Uniform => write!(f, "{}", POLICY_UNIFORM),
        }
    }
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub unknown_user_policy: UnknownUserPolicy,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("unknown_user_policy", &self.unknown_user_policy)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            unknown_user_policy: UnknownUserPolicy::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let unknown_user_policy = match env::var("LOGIN_UNKNOWN_USER_POLICY") {
            Ok(raw) => raw.parse().unwrap_or_else(|e| {
                tracing::warn!("{}, falling back to '{}'", e, UnknownUserPolicy::default());
                UnknownUserPolicy::default()
            }),
            Err(_) => UnknownUserPolicy::default(),
        };

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
            unknown_user_policy,
        }
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
