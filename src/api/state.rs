//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::{Config, UnknownUserPolicy};
use crate::infra::Database;
use crate::services::{AuthService, DecoyVerifier, ServiceContainer, Services, UserService};

/// Application state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    /// Login orchestrator
    pub auth_service: Arc<dyn AuthService>,
    /// User service
    pub user_service: Arc<dyn UserService>,
    /// How an unknown username is reported at the boundary
    pub unknown_user_policy: UnknownUserPolicy,
    /// Spent on unknown usernames when the policy hides them
    pub decoy: Option<Arc<DecoyVerifier>>,
    /// Database handle, used by the health check when present
    pub database: Option<Arc<Database>>,
}

impl AppState {
    /// Create application state from a connected database and config.
    pub fn from_config(database: Arc<Database>, config: &Config) -> Self {
        let services = Services::from_connection(database.get_connection());
        Self::from_services(&services, config.unknown_user_policy).with_database(database)
    }

    /// Create application state from any service container.
    pub fn from_services(services: &dyn ServiceContainer, policy: UnknownUserPolicy) -> Self {
        Self::new(services.auth(), services.users(), policy)
    }

    /// Create application state with manually injected services.
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        user_service: Arc<dyn UserService>,
        unknown_user_policy: UnknownUserPolicy,
    ) -> Self {
        let decoy = (unknown_user_policy == UnknownUserPolicy::Uniform)
            .then(|| Arc::new(DecoyVerifier::new()));

        Self {
            auth_service,
            user_service,
            unknown_user_policy,
            decoy,
            database: None,
        }
    }

    pub fn with_database(mut self, database: Arc<Database>) -> Self {
        self.database = Some(database);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::MockUserRepository;
    use crate::services::{
        Argon2Hasher, AuthManager, MockCredentialAuthenticator, MockServiceContainer, UserManager,
    };

    #[test]
    fn test_from_services_pulls_both_services() {
        let users = Arc::new(UserManager::new(
            Arc::new(MockUserRepository::new()),
            Arc::new(Argon2Hasher),
        ));
        let auth: Arc<dyn AuthService> = Arc::new(AuthManager::new(
            users.clone(),
            Arc::new(MockCredentialAuthenticator::new()),
        ));
        let users: Arc<dyn UserService> = users;

        let mut container = MockServiceContainer::new();
        container
            .expect_auth()
            .times(1)
            .returning(move || auth.clone());
        container
            .expect_users()
            .times(1)
            .returning(move || users.clone());

        let state = AppState::from_services(&container, UnknownUserPolicy::Uniform);

        assert_eq!(state.unknown_user_policy, UnknownUserPolicy::Uniform);
        assert!(state.database.is_none());
    }

    #[test]
    fn test_decoy_only_built_for_uniform_policy() {
        let users = Arc::new(UserManager::new(
            Arc::new(MockUserRepository::new()),
            Arc::new(Argon2Hasher),
        ));
        let auth: Arc<dyn AuthService> = Arc::new(AuthManager::new(
            users.clone(),
            Arc::new(MockCredentialAuthenticator::new()),
        ));

        let distinct = AppState::new(auth.clone(), users.clone(), UnknownUserPolicy::Distinct);
        let uniform = AppState::new(auth, users, UnknownUserPolicy::Uniform);

        assert!(distinct.decoy.is_none());
        assert!(uniform.decoy.is_some());
    }
}
