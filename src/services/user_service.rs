//! User service - Handles user-related business logic.
//!
//! Owns the write path of the identity store: secrets are hashed here,
//! once, before a record is inserted. It also serves as the identity
//! lookup for the login flow.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use super::auth_service::IdentityLookup;
use super::verifier::SecretHasher;
use crate::domain::{ChangePassword, CreateUser, NewUser, UpdateUser, User};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Get user by ID
    async fn get_user(&self, id: Uuid) -> AppResult<User>;

    /// List all users
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Register a user; username and email must be unused
    async fn create_user(&self, input: CreateUser) -> AppResult<User>;

    /// Update profile and account status fields
    async fn update_user(&self, id: Uuid, changes: UpdateUser) -> AppResult<User>;

    /// Replace the user's password
    async fn change_password(&self, id: Uuid, input: ChangePassword) -> AppResult<User>;

    /// Permanently delete user
    async fn delete_user(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of UserService over a repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
    hasher: Arc<dyn SecretHasher>,
}

impl UserManager {
    pub fn new(repo: Arc<dyn UserRepository>, hasher: Arc<dyn SecretHasher>) -> Self {
        Self { repo, hasher }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.repo.find_by_id(id).await?.ok_or_not_found()
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.repo.list().await
    }

    async fn create_user(&self, input: CreateUser) -> AppResult<User> {
        input.validate()?;

        if self.repo.find_by_username(&input.username).await?.is_some() {
            return Err(AppError::conflict("Username"));
        }
        if self.repo.find_by_email(&input.email).await?.is_some() {
            return Err(AppError::conflict("Email"));
        }

        let password_hash = self.hasher.hash(&input.password)?;
        let user = self
            .repo
            .create(NewUser {
                username: input.username,
                email: input.email,
                name: input.name,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = %user.id, username = %user.username, "User created");
        Ok(user)
    }

    async fn update_user(&self, id: Uuid, changes: UpdateUser) -> AppResult<User> {
        changes.validate()?;

        if let Some(email) = changes.email.as_deref() {
            if let Some(other) = self.repo.find_by_email(email).await? {
                if other.id != id {
                    return Err(AppError::conflict("Email"));
                }
            }
        }

        self.repo.update(id, changes).await
    }

    async fn change_password(&self, id: Uuid, input: ChangePassword) -> AppResult<User> {
        input.validate()?;

        let password_hash = self.hasher.hash(&input.password)?;
        let user = self.repo.update_password(id, password_hash).await?;

        tracing::info!(user_id = %user.id, "Password changed");
        Ok(user)
    }

    async fn delete_user(&self, id: Uuid) -> AppResult<()> {
        self.repo.delete(id).await?;
        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }
}

#[async_trait]
impl IdentityLookup for UserManager {
    async fn lookup(&self, username: &str) -> AppResult<Option<User>> {
        self.repo.find_by_username(username).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::MockUserRepository;
    use crate::services::verifier::Argon2Hasher;

    fn existing(username: &str, email: &str) -> User {
        User::new(NewUser {
            username: username.to_string(),
            email: email.to_string(),
            name: "Existing".to_string(),
            password_hash: "$argon2id$stub".to_string(),
        })
    }

    fn create_input() -> CreateUser {
        CreateUser {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            name: "Alice".to_string(),
            password: "correct-horse".to_string(),
        }
    }

    fn service(repo: MockUserRepository) -> UserManager {
        UserManager::new(Arc::new(repo), Arc::new(Argon2Hasher))
    }

    #[tokio::test]
    async fn test_create_user_stores_hash_not_plaintext() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username().returning(|_| Ok(None));
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_create()
            .withf(|new_user| {
                new_user.password_hash != "correct-horse"
                    && new_user.password_hash.starts_with("$argon2")
            })
            .times(1)
            .returning(|new_user| Ok(User::new(new_user)));

        let user = service(repo).create_user(create_input()).await.unwrap();

        assert_eq!(user.username, "alice");
        assert!(user.enabled);
        assert!(!user.locked);
    }

    #[tokio::test]
    async fn test_create_user_rejects_taken_username() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .returning(|_| Ok(Some(existing("alice", "other@example.com"))));
        repo.expect_create().times(0);

        let result = service(repo).create_user(create_input()).await;
        assert!(matches!(result, Err(AppError::Conflict(ref e)) if e == "Username"));
    }

    #[tokio::test]
    async fn test_create_user_rejects_taken_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username().returning(|_| Ok(None));
        repo.expect_find_by_email()
            .returning(|_| Ok(Some(existing("bob", "alice@example.com"))));
        repo.expect_create().times(0);

        let result = service(repo).create_user(create_input()).await;
        assert!(matches!(result, Err(AppError::Conflict(ref e)) if e == "Email"));
    }

    #[tokio::test]
    async fn test_create_user_validates_input() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username().times(0);
        repo.expect_create().times(0);

        let mut input = create_input();
        input.email = "not-an-email".to_string();

        let result = service(repo).create_user(input).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_get_missing_user_is_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let result = service(repo).get_user(Uuid::new_v4()).await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_update_user_allows_keeping_own_email() {
        let user = existing("alice", "alice@example.com");
        let id = user.id;
        let mut repo = MockUserRepository::new();
        let found = user.clone();
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(found.clone())));
        repo.expect_update().times(1).returning(move |_, changes| {
            let mut updated = user.clone();
            updated.apply(changes);
            Ok(updated)
        });

        let changes = UpdateUser {
            email: Some("alice@example.com".to_string()),
            locked: Some(true),
            ..Default::default()
        };
        let updated = service(repo).update_user(id, changes).await.unwrap();

        assert!(updated.locked);
    }

    #[tokio::test]
    async fn test_update_user_rejects_email_of_another_user() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(|_| Ok(Some(existing("bob", "bob@example.com"))));
        repo.expect_update().times(0);

        let changes = UpdateUser {
            email: Some("bob@example.com".to_string()),
            ..Default::default()
        };
        let result = service(repo).update_user(Uuid::new_v4(), changes).await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_change_password_stores_new_hash() {
        let user = existing("alice", "alice@example.com");
        let id = user.id;
        let mut repo = MockUserRepository::new();
        repo.expect_update_password()
            .withf(move |target, hash| {
                *target == id && hash != "tr0ub4dor-and-3" && hash.starts_with("$argon2")
            })
            .times(1)
            .returning(move |_, hash| {
                let mut updated = user.clone();
                updated.password_hash = hash;
                Ok(updated)
            });

        let input = ChangePassword {
            password: "tr0ub4dor-and-3".to_string(),
        };
        let updated = service(repo).change_password(id, input).await.unwrap();

        assert!(updated.password_hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn test_change_password_rejects_short_password() {
        let mut repo = MockUserRepository::new();
        repo.expect_update_password().times(0);

        let input = ChangePassword {
            password: "short".to_string(),
        };
        let result = service(repo).change_password(Uuid::new_v4(), input).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_lookup_resolves_by_username() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .withf(|username| username == "alice")
            .times(1)
            .returning(|_| Ok(Some(existing("alice", "alice@example.com"))));

        let found = service(repo).lookup("alice").await.unwrap();
        assert_eq!(found.map(|u| u.username), Some("alice".to_string()));
    }
}
