//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::handlers::{auth_handler, user_handler};
use crate::domain::{
    ChangePassword, CreateUser, CredentialPair, Principal, UpdateUser, UserResponse,
};
use crate::types::LoginResponse;

/// OpenAPI documentation for the login API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Login API",
        version = "0.1.0",
        description = "Username/password login endpoint backed by an argon2 identity store"
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        auth_handler::login,
        user_handler::list_users,
        user_handler::create_user,
        user_handler::get_user,
        user_handler::update_user,
        user_handler::delete_user,
        user_handler::change_password,
    ),
    components(
        schemas(
            CredentialPair,
            Principal,
            LoginResponse,
            UserResponse,
            CreateUser,
            UpdateUser,
            ChangePassword,
        )
    ),
    tags(
        (name = "Authentication", description = "Login"),
        (name = "Users", description = "Identity store management")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_login_and_user_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<_> = doc.paths.paths.keys().cloned().collect();

        assert!(paths.contains(&"/login".to_string()));
        assert!(paths.contains(&"/api/users".to_string()));
        assert!(paths.contains(&"/api/users/{id}".to_string()));
        assert!(paths.contains(&"/api/users/{id}/password".to_string()));
    }
}
