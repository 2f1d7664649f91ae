//! Login orchestrator tests against the real argon2 authenticator.

mod common;

use std::sync::Arc;

use common::{BrokenLookup, Fixture, ALICE_PASSWORD};
use login_api::config::{ACCOUNT_DISABLED_MESSAGE, ACCOUNT_LOCKED_MESSAGE};
use login_api::domain::{AuthError, CredentialPair, SecurityContext};
use login_api::services::{AuthManager, AuthService, PasswordAuthenticator};

#[tokio::test]
async fn test_missing_fields_stop_before_lookup() {
    let fx = Fixture::new();

    let cases = [
        None,
        Some(CredentialPair::default()),
        Some(CredentialPair::new("", "x")),
        Some(CredentialPair::new("alice", "")),
        Some(CredentialPair {
            username: Some("alice".to_string()),
            password: None,
        }),
    ];

    for pair in cases {
        let mut ctx = SecurityContext::new();
        let result = fx.auth.authenticate(pair.as_ref(), &mut ctx).await;
        assert_eq!(result, Err(AuthError::InvalidCredentials));
        assert!(!ctx.is_authenticated());
    }

    assert_eq!(fx.lookup_calls(), 0);
}

#[tokio::test]
async fn test_unknown_user_stops_before_authenticator() {
    let fx = Fixture::new();
    let mut ctx = SecurityContext::new();

    let result = fx
        .auth
        .authenticate(Some(&CredentialPair::new("ghost", "any")), &mut ctx)
        .await;

    assert_eq!(result, Err(AuthError::UserNotFound));
    assert_eq!(fx.lookup_calls(), 1);
    assert_eq!(fx.authenticator_calls(), 0);
    assert!(!ctx.is_authenticated());
}

#[tokio::test]
async fn test_wrong_password_leaves_context_unset() {
    let fx = Fixture::new();
    let mut ctx = SecurityContext::new();

    let result = fx
        .auth
        .authenticate(Some(&CredentialPair::new("alice", "wrong-horse")), &mut ctx)
        .await;

    assert_eq!(result, Err(AuthError::bad_credentials()));
    assert!(ctx.principal().is_none());
}

#[tokio::test]
async fn test_correct_password_sets_exactly_that_principal() {
    let fx = Fixture::new();
    let mut ctx = SecurityContext::new();

    let principal = fx
        .auth
        .authenticate(Some(&CredentialPair::new("alice", ALICE_PASSWORD)), &mut ctx)
        .await
        .unwrap();

    assert_eq!(principal.user_id, fx.alice.id);
    assert_eq!(principal.username, "alice");
    assert_eq!(ctx.into_principal(), Some(principal));
}

#[tokio::test]
async fn test_submitted_secret_reaches_authenticator_unhashed() {
    let fx = Fixture::new();
    let mut ctx = SecurityContext::new();

    fx.auth
        .authenticate(Some(&CredentialPair::new("alice", ALICE_PASSWORD)), &mut ctx)
        .await
        .unwrap();

    let seen = fx.authenticator.last_secret.lock().unwrap().clone();
    assert_eq!(seen.as_deref(), Some(ALICE_PASSWORD));
}

#[tokio::test]
async fn test_account_status_only_disclosed_with_correct_password() {
    let fx = Fixture::new();

    for (username, message) in [("dora", ACCOUNT_DISABLED_MESSAGE), ("lou", ACCOUNT_LOCKED_MESSAGE)] {
        let mut ctx = SecurityContext::new();
        let wrong = fx
            .auth
            .authenticate(Some(&CredentialPair::new(username, "wrong-horse")), &mut ctx)
            .await;
        assert_eq!(wrong, Err(AuthError::bad_credentials()));

        let right = fx
            .auth
            .authenticate(Some(&CredentialPair::new(username, ALICE_PASSWORD)), &mut ctx)
            .await;
        assert_eq!(right, Err(AuthError::failed(message)));
        assert!(!ctx.is_authenticated());
    }
}

#[tokio::test]
async fn test_repeated_failures_are_stable() {
    let fx = Fixture::new();
    let pair = CredentialPair::new("alice", "wrong-horse");

    let mut outcomes = Vec::new();
    for _ in 0..3 {
        let mut ctx = SecurityContext::new();
        outcomes.push(fx.auth.authenticate(Some(&pair), &mut ctx).await);
    }

    assert!(outcomes.iter().all(|o| *o == Err(AuthError::bad_credentials())));
}

#[tokio::test]
async fn test_lookup_outage_is_internal() {
    let auth = AuthManager::new(Arc::new(BrokenLookup), Arc::new(PasswordAuthenticator));
    let mut ctx = SecurityContext::new();

    let result = auth
        .authenticate(Some(&CredentialPair::new("alice", ALICE_PASSWORD)), &mut ctx)
        .await;

    assert!(matches!(result, Err(AuthError::Internal(_))));
}
