//! Service Container - Centralized service access.
//!
//! Wires the login orchestrator and the user service from a single
//! database connection. Everything the orchestrator needs is passed in
//! through constructors.

use std::sync::Arc;

use super::{
    Argon2Hasher, AuthManager, AuthService, PasswordAuthenticator, UserManager, UserService,
};
use crate::infra::UserStore;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get user service
    fn users(&self) -> Arc<dyn UserService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
}

impl Services {
    pub fn new(auth_service: Arc<dyn AuthService>, user_service: Arc<dyn UserService>) -> Self {
        Self {
            auth_service,
            user_service,
        }
    }

    /// Build every service over the given database connection
    pub fn from_connection(db: sea_orm::DatabaseConnection) -> Self {
        let users = Arc::new(UserManager::new(
            Arc::new(UserStore::new(db)),
            Arc::new(Argon2Hasher),
        ));
        let auth_service = Arc::new(AuthManager::new(
            users.clone(),
            Arc::new(PasswordAuthenticator),
        ));

        Self {
            auth_service,
            user_service: users,
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }
}
