//! Login API - username/password authentication over HTTP
//!
//! A `POST /login` endpoint that validates a submitted credential pair,
//! resolves the identity record, verifies the secret against its stored
//! argon2 verifier and reports the authenticated principal. Every
//! collaborator is injected, and the security context is a per-request
//! value rather than global state.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Credentials, principals, users and the login error taxonomy
//! - **services**: Login orchestrator, secret verification, user directory
//! - **infra**: Database, migrations and the user repository
//! - **api**: HTTP handlers, extractors and routes
//! - **types**: Shared response types
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Create the schema and a first user
//! cargo run -- migrate up
//! cargo run -- user create --username alice --email alice@example.com \
//!     --name Alice --password correct-horse
//!
//! # Start the server
//! cargo run -- serve --port 3000
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::{Config, UnknownUserPolicy};
pub use domain::{AuthError, CredentialPair, Principal, SecurityContext, User};
pub use errors::{AppError, AppResult};
