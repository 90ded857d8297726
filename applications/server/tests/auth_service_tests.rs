/// Authentication service tests
/// Tests token issuance and expiry, password hashing, and the signup/login path
mod common;

use common::{create_test_auth_service, create_test_database, TestClock, TEST_EXPIRE_MINUTES};
use moon_server::{
    error::{AuthError, ServerError},
    services::{AccessControl, NewAccount},
};
use std::sync::Arc;

const ISSUED_AT: i64 = 1_700_000_000;

fn account(username: &str, password: &str) -> NewAccount {
    NewAccount {
        username: username.to_string(),
        password: password.to_string(),
        firstname: "Ada".to_string(),
        lastname: "Lovelace".to_string(),
    }
}

/// Test password hashing produces valid bcrypt hashes
#[test]
fn test_password_hashing() {
    let auth_service = create_test_auth_service();

    let password = "MySecurePassword123!";
    let hash = auth_service.hash_password(password).unwrap();

    // Verify hash format (bcrypt starts with $2b$ or $2a$)
    assert!(hash.starts_with("$2b$") || hash.starts_with("$2a$"));
    assert_ne!(hash, password);

    // Verify the hash is different each time (salt is random)
    let hash2 = auth_service.hash_password(password).unwrap();
    assert_ne!(hash, hash2, "Hashes should differ due to random salt");

    assert!(auth_service.verify_password(password, &hash));
    assert!(auth_service.verify_password(password, &hash2));
}

/// A token is accepted one second before expiry and rejected at expiry
#[test]
fn test_token_expiry_boundary() {
    let clock = TestClock::at(ISSUED_AT);
    let auth_service = create_test_auth_service().with_clock(clock.clone());

    let token = auth_service.create_access_token("alice").unwrap();
    assert_eq!(auth_service.verify_token(&token).unwrap(), "alice");

    let ttl = chrono::Duration::minutes(TEST_EXPIRE_MINUTES as i64);
    clock.advance(ttl - chrono::Duration::seconds(1));
    assert_eq!(auth_service.verify_token(&token).unwrap(), "alice");

    clock.advance(chrono::Duration::seconds(1));
    assert_eq!(
        auth_service.verify_token(&token),
        Err(AuthError::InvalidToken)
    );
}

/// Custom lifetimes are honored the same way
#[test]
fn test_issue_token_with_custom_ttl() {
    let clock = TestClock::at(ISSUED_AT);
    let auth_service = create_test_auth_service().with_clock(clock.clone());

    let token = auth_service
        .issue_token("bob", chrono::Duration::seconds(5))
        .unwrap();

    clock.advance(chrono::Duration::seconds(4));
    assert!(auth_service.verify_token(&token).is_ok());

    clock.advance(chrono::Duration::seconds(1));
    assert!(auth_service.verify_token(&token).is_err());
}

/// A token with an empty subject is never valid
#[test]
fn test_empty_subject_is_rejected() {
    let auth_service = create_test_auth_service();
    let token = auth_service.create_access_token("").unwrap();

    assert_eq!(
        auth_service.verify_token(&token),
        Err(AuthError::InvalidToken)
    );
}

/// Tampering with the payload breaks the signature
#[test]
fn test_tampered_token_is_rejected() {
    let auth_service = create_test_auth_service();
    let token = auth_service.create_access_token("alice").unwrap();

    let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
    let forged = create_test_auth_service()
        .create_access_token("mallory")
        .unwrap();
    parts[1] = forged.split('.').nth(1).unwrap().to_string();
    let tampered = parts.join(".");

    // mallory's claims under alice's signature
    assert_eq!(
        auth_service.verify_token(&tampered),
        Err(AuthError::InvalidToken)
    );
}

/// Signup, login and token verification agree on the username
#[tokio::test]
async fn test_signup_login_verify() {
    let (db, _dir) = create_test_database().await.unwrap();
    let auth_service = Arc::new(create_test_auth_service());
    let access = AccessControl::new(db, Arc::clone(&auth_service));

    let user = access.signup(account("alice", "hunter22")).await.unwrap();
    assert_eq!(user.username, "alice");
    assert_ne!(user.hashed_password, "hunter22");

    let logged_in = access.authenticate("alice", "hunter22").await.unwrap();
    assert_eq!(logged_in.id, user.id);

    let token = auth_service.create_access_token(&logged_in.username).unwrap();
    assert_eq!(auth_service.verify_token(&token).unwrap(), "alice");

    let current = access.current_user(&token).await.unwrap();
    assert_eq!(current.id, user.id);
}

/// Changing one character of the password fails authentication
#[tokio::test]
async fn test_one_character_off_password_fails() {
    let (db, _dir) = create_test_database().await.unwrap();
    let access = AccessControl::new(db, Arc::new(create_test_auth_service()));

    access.signup(account("alice", "hunter22")).await.unwrap();

    for attempt in ["hunter23", "Hunter22", "hunter2", "hunter222"] {
        let result = access.authenticate("alice", attempt).await;
        assert!(
            matches!(result, Err(ServerError::Auth(AuthError::BadCredentials))),
            "password {attempt:?} should not authenticate"
        );
    }
}

/// Characters past bcrypt's 72-byte window still matter
#[tokio::test]
async fn test_change_after_byte_72_fails() {
    let (db, _dir) = create_test_database().await.unwrap();
    let access = AccessControl::new(db, Arc::new(create_test_auth_service()));

    let prefix = "x".repeat(72);

    // Too long to store without truncation
    let result = access
        .signup(account("alice", &format!("{prefix}A")))
        .await;
    assert!(matches!(result, Err(ServerError::Validation(_))));

    // The longest accepted password cannot be extended at login
    access.signup(account("alice", &prefix)).await.unwrap();
    assert!(access.authenticate("alice", &prefix).await.is_ok());

    let result = access.authenticate("alice", &format!("{prefix}B")).await;
    assert!(matches!(
        result,
        Err(ServerError::Auth(AuthError::BadCredentials))
    ));
}

/// Usernames are trimmed the same way at signup and login
#[tokio::test]
async fn test_username_whitespace_is_consistent() {
    let (db, _dir) = create_test_database().await.unwrap();
    let access = AccessControl::new(db, Arc::new(create_test_auth_service()));

    let user = access.signup(account("alice ", "hunter22")).await.unwrap();
    assert_eq!(user.username, "alice");

    assert_eq!(
        access.authenticate("alice ", "hunter22").await.unwrap().id,
        user.id
    );
    assert_eq!(
        access.authenticate("alice", "hunter22").await.unwrap().id,
        user.id
    );
}

/// Unknown usernames fail as not found
#[tokio::test]
async fn test_unknown_user_fails() {
    let (db, _dir) = create_test_database().await.unwrap();
    let access = AccessControl::new(db, Arc::new(create_test_auth_service()));

    let result = access.authenticate("nobody", "password").await;
    assert!(matches!(
        result,
        Err(ServerError::Auth(AuthError::UserNotFound))
    ));
}

/// A second signup with the same name is a conflict
#[tokio::test]
async fn test_duplicate_signup_conflicts() {
    let (db, _dir) = create_test_database().await.unwrap();
    let access = AccessControl::new(db, Arc::new(create_test_auth_service()));

    access.signup(account("alice", "first")).await.unwrap();
    let result = access.signup(account("alice", "second")).await;

    assert!(matches!(result, Err(ServerError::Conflict(_))));

    // The original password still works
    assert!(access.authenticate("alice", "first").await.is_ok());
}

/// Blank usernames and passwords are rejected before hashing
#[tokio::test]
async fn test_signup_validation() {
    let (db, _dir) = create_test_database().await.unwrap();
    let access = AccessControl::new(db, Arc::new(create_test_auth_service()));

    assert!(matches!(
        access.signup(account("   ", "password")).await,
        Err(ServerError::Validation(_))
    ));
    assert!(matches!(
        access.signup(account("alice", "")).await,
        Err(ServerError::Validation(_))
    ));
}

/// A valid token for a user that no longer resolves is rejected
#[tokio::test]
async fn test_token_for_missing_user() {
    let (db, _dir) = create_test_database().await.unwrap();
    let auth_service = Arc::new(create_test_auth_service());
    let access = AccessControl::new(db, Arc::clone(&auth_service));

    let token = auth_service.create_access_token("ghost").unwrap();
    assert!(matches!(
        access.current_user(&token).await,
        Err(ServerError::Auth(AuthError::UserNotFound))
    ));
}
