//! Shared fixtures for integration tests.
//!
//! An in-memory identity store plus call-counting wrappers around the real
//! lookup and authenticator, so tests can assert which collaborators a
//! request reached.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use uuid::Uuid;

use login_api::api::{create_router, AppState};
use login_api::config::UnknownUserPolicy;
use login_api::domain::{AuthResult, NewUser, Principal, UpdateUser, User};
use login_api::errors::{AppError, AppResult};
use login_api::infra::UserRepository;
use login_api::services::{
    Argon2Hasher, AuthManager, CredentialAuthenticator, IdentityLookup, PasswordAuthenticator,
    SecretHasher, UserManager,
};

pub const ALICE_PASSWORD: &str = "correct-horse";

// =============================================================================
// In-memory identity store
// =============================================================================

#[derive(Default)]
pub struct InMemoryUsers {
    users: Mutex<Vec<User>>,
}

impl InMemoryUsers {
    pub fn insert(&self, username: &str, password: &str, enabled: bool, locked: bool) -> User {
        let mut user = User::new(NewUser {
            username: username.to_string(),
            email: format!("{}@example.com", username),
            name: username.to_string(),
            password_hash: Argon2Hasher.hash(password).unwrap(),
        });
        user.enabled = enabled;
        user.locked = locked;
        self.users.lock().unwrap().push(user.clone());
        user
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let user = User::new(new_user);
        self.users.lock().unwrap().push(user.clone());
        Ok(user)
    }

    async fn update(&self, id: Uuid, changes: UpdateUser) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(AppError::NotFound)?;
        user.apply(changes);
        Ok(user.clone())
    }

    async fn update_password(&self, id: Uuid, password_hash: String) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(AppError::NotFound)?;
        user.password_hash = password_hash;
        Ok(user.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != id);
        if users.len() == before {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let mut users = self.users.lock().unwrap().clone();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }
}

// =============================================================================
// Call-counting collaborators
// =============================================================================

pub struct CountingLookup {
    inner: Arc<dyn IdentityLookup>,
    pub calls: AtomicUsize,
}

#[async_trait]
impl IdentityLookup for CountingLookup {
    async fn lookup(&self, username: &str) -> AppResult<Option<User>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.lookup(username).await
    }
}

#[derive(Default)]
pub struct CountingAuthenticator {
    pub calls: AtomicUsize,
    pub last_secret: Mutex<Option<String>>,
}

impl CredentialAuthenticator for CountingAuthenticator {
    fn authenticate(&self, identity: &User, secret: &str) -> AuthResult<Principal> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_secret.lock().unwrap() = Some(secret.to_string());
        PasswordAuthenticator.authenticate(identity, secret)
    }
}

/// Lookup that always fails, standing in for an unreachable store.
pub struct BrokenLookup;

#[async_trait]
impl IdentityLookup for BrokenLookup {
    async fn lookup(&self, _username: &str) -> AppResult<Option<User>> {
        Err(AppError::internal("connection refused"))
    }
}

// =============================================================================
// Fixture
// =============================================================================

/// Real services over the in-memory store, seeded with
/// `alice` (active), `dora` (disabled) and `lou` (locked), all sharing
/// [`ALICE_PASSWORD`].
pub struct Fixture {
    pub store: Arc<InMemoryUsers>,
    pub users: Arc<UserManager>,
    pub lookup: Arc<CountingLookup>,
    pub authenticator: Arc<CountingAuthenticator>,
    pub auth: Arc<AuthManager>,
    pub alice: User,
}

impl Fixture {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryUsers::default());
        let alice = store.insert("alice", ALICE_PASSWORD, true, false);
        store.insert("dora", ALICE_PASSWORD, false, false);
        store.insert("lou", ALICE_PASSWORD, true, true);

        let users = Arc::new(UserManager::new(store.clone(), Arc::new(Argon2Hasher)));
        let lookup = Arc::new(CountingLookup {
            inner: users.clone(),
            calls: AtomicUsize::new(0),
        });
        let authenticator = Arc::new(CountingAuthenticator::default());
        let auth = Arc::new(AuthManager::new(lookup.clone(), authenticator.clone()));

        Self {
            store,
            users,
            lookup,
            authenticator,
            auth,
            alice,
        }
    }

    pub fn lookup_calls(&self) -> usize {
        self.lookup.calls.load(Ordering::SeqCst)
    }

    pub fn authenticator_calls(&self) -> usize {
        self.authenticator.calls.load(Ordering::SeqCst)
    }

    pub fn router(&self, policy: UnknownUserPolicy) -> Router {
        create_router(AppState::new(self.auth.clone(), self.users.clone(), policy))
    }
}
