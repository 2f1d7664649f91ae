//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) so every
//! collaborator can be replaced in tests.

mod auth_service;
pub mod container;
mod user_service;
mod verifier;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{AuthManager, AuthService, CredentialAuthenticator, IdentityLookup};
pub use user_service::{UserManager, UserService};
pub use verifier::{Argon2Hasher, DecoyVerifier, PasswordAuthenticator, SecretHasher};

#[cfg(any(test, feature = "test-utils"))]
pub use auth_service::{MockCredentialAuthenticator, MockIdentityLookup};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
