//! Domain layer - Core business entities and logic
//!
//! Credential pairs and their validation, the login error taxonomy, the
//! authenticated principal with its per-request security context, and the
//! user identity record with its password verifier.

pub mod credentials;
pub mod error;
pub mod password;
pub mod principal;
pub mod user;

pub use credentials::CredentialPair;
pub use error::{AuthError, AuthResult};
pub use password::Password;
pub use principal::{Principal, SecurityContext};
pub use user::{ChangePassword, CreateUser, NewUser, UpdateUser, User, UserResponse};
