//! Authenticated principal and the per-request security context.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::user::User;

/// Identity attached to a request after a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Principal {
    /// Identifier of the authenticated user
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub user_id: Uuid,
    /// Login name of the authenticated user
    #[schema(example = "alice")]
    pub username: String,
    /// When the secret comparison succeeded
    pub authenticated_at: DateTime<Utc>,
}

impl Principal {
    /// Principal for an identity whose secret was just verified.
    pub fn for_user(user: &User) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
            authenticated_at: Utc::now(),
        }
    }
}

/// Holder of the current principal for one request.
///
/// Created by the request handler and passed down explicitly; it is never
/// shared between requests.
#[derive(Debug, Clone, Default)]
pub struct SecurityContext {
    principal: Option<Principal>,
}

impl SecurityContext {
    /// Empty, unauthenticated context
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the principal produced by a successful authentication
    pub fn set_principal(&mut self, principal: Principal) {
        self.principal = Some(principal);
    }

    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.principal.is_some()
    }

    pub fn into_principal(self) -> Option<Principal> {
        self.principal
    }
}
