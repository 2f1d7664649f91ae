//! User domain entity - the identity record read by the login flow.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::config::{MAX_USERNAME_LENGTH, MIN_NAME_LENGTH, MIN_PASSWORD_LENGTH, MIN_USERNAME_LENGTH};

/// Stored user, including the verifier used to check its password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub enabled: bool,
    pub locked: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Build an active, unlocked user from freshly validated input
    pub fn new(new_user: NewUser) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username: new_user.username,
            email: new_user.email,
            name: new_user.name,
            password_hash: new_user.password_hash,
            enabled: true,
            locked: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply the present fields of an update
    pub fn apply(&mut self, changes: UpdateUser) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(email) = changes.email {
            self.email = email;
        }
        if let Some(enabled) = changes.enabled {
            self.enabled = enabled;
        }
        if let Some(locked) = changes.locked {
            self.locked = locked;
        }
        self.updated_at = Utc::now();
    }
}

/// User data ready for insertion (password already hashed)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub name: String,
    pub password_hash: String,
}

/// User creation request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    /// Unique login name
    #[validate(length(
        min = MIN_USERNAME_LENGTH,
        max = MAX_USERNAME_LENGTH,
        message = "Username must be 1-64 characters"
    ))]
    #[schema(example = "alice")]
    pub username: String,
    /// Unique email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "alice@example.com")]
    pub email: String,
    /// Display name
    #[validate(length(min = MIN_NAME_LENGTH, message = "Name is required"))]
    #[schema(example = "Alice Liddell")]
    pub name: String,
    /// Plaintext password (minimum 8 characters), hashed before storage
    #[validate(length(min = MIN_PASSWORD_LENGTH, message = "Password must be at least 8 characters"))]
    #[schema(example = "correct-horse-battery", min_length = 8)]
    pub password: String,
}

/// User update request
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    /// New display name
    #[validate(length(min = MIN_NAME_LENGTH, message = "Name cannot be empty"))]
    #[schema(example = "Alice L.")]
    pub name: Option<String>,
    /// New email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "alice@example.org")]
    pub email: Option<String>,
    /// Enable or disable the account
    pub enabled: Option<bool>,
    /// Lock or unlock the account
    pub locked: Option<bool>,
}

/// Password change request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ChangePassword {
    /// New plaintext password, hashed before storage
    #[validate(length(min = MIN_PASSWORD_LENGTH, message = "Password must be at least 8 characters"))]
    #[schema(example = "tr0ub4dor-and-3", min_length = 8)]
    pub password: String,
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    /// Unique user identifier
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    #[schema(example = "alice")]
    pub username: String,
    #[schema(example = "alice@example.com")]
    pub email: String,
    #[schema(example = "Alice Liddell")]
    pub name: String,
    pub enabled: bool,
    pub locked: bool,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            name: user.name,
            enabled: user.enabled,
            locked: user.locked,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user() -> NewUser {
        NewUser {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            name: "Alice".to_string(),
            password_hash: "hash".to_string(),
        }
    }

    #[test]
    fn test_new_user_is_active() {
        let user = User::new(new_user());
        assert!(user.enabled);
        assert!(!user.locked);
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn test_apply_only_touches_present_fields() {
        let mut user = User::new(new_user());
        user.apply(UpdateUser {
            locked: Some(true),
            ..Default::default()
        });

        assert!(user.locked);
        assert_eq!(user.name, "Alice");
        assert_eq!(user.email, "alice@example.com");
    }

    #[test]
    fn test_response_omits_password_hash() {
        let json = serde_json::to_value(UserResponse::from(User::new(new_user()))).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["username"], "alice");
    }
}
