use std::sync::Arc;

use vocab_types::{Id, User};

use super::fakes::{FakeUsers, conflict, not_found};
use crate::auth::{AuthStore, LOGIN_FAILED};
use crate::error::AuthError;
use crate::password::hash_password;
use crate::session::SessionContext;
use crate::validation::{Field, RegistrationForm};
use crate::storage::{MemoryStorage, SessionStorage};

const KEY: &str = "currentUser";

fn setup() -> (Arc<FakeUsers>, Arc<MemoryStorage>, AuthStore) {
    let users = Arc::new(FakeUsers::default());
    let storage = Arc::new(MemoryStorage::new());
    let session = SessionContext::new(storage.clone(), KEY);
    (users.clone(), storage, AuthStore::new(users, session))
}

fn stored_user(email: &str, password: &str) -> User {
    User {
        id: Id::Num(1),
        full_name: "Ann Lee".into(),
        email: email.into(),
        password: hash_password(password).unwrap(),
        role: "admin".into(),
    }
}

#[tokio::test]
async fn test_register_hashes_and_does_not_sign_in() {
    let (users, storage, auth) = setup();

    let created = auth
        .register(" Ann Lee ", "ann@example.com", "12345678")
        .await
        .unwrap();
    assert_eq!(created.full_name, "Ann Lee");

    let stored = users.users.lock().unwrap()[0].clone();
    assert_ne!(stored.password, "12345678");
    assert!(stored.password.starts_with("$argon2id$"));
    assert_eq!(stored.role, "user");

    assert_eq!(auth.current_user(), None);
    assert_eq!(storage.read(KEY).unwrap(), None);
    assert!(!auth.snapshot().is_loading());
}

#[tokio::test]
async fn test_invalid_form_is_not_submitted() {
    let (users, _storage, auth) = setup();
    let form = RegistrationForm {
        full_name: "Ann Lee".into(),
        email: "ann@example.com".into(),
        password: "12345678".into(),
        confirm_password: "87654321".into(),
    };

    let err = auth.submit_registration(&form).await.unwrap_err();
    let AuthError::Invalid(errors) = &err else {
        panic!("expected validation failure, got {err:?}");
    };
    assert_eq!(errors[0].field, Field::ConfirmPassword);
    assert_eq!(err.to_string(), "Confirmation must match the password!");
    assert!(users.users.lock().unwrap().is_empty());
    assert_eq!(auth.snapshot().error, None);

    let form = RegistrationForm {
        confirm_password: "12345678".into(),
        ..form
    };
    auth.submit_registration(&form).await.unwrap();
    assert_eq!(users.users.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_register_then_login() {
    let (_users, storage, auth) = setup();
    auth.register("Ann Lee", "ann@example.com", "12345678")
        .await
        .unwrap();

    let user = auth.login("ann@example.com", "12345678").await.unwrap();
    assert_eq!(user.email, "ann@example.com");
    assert_eq!(auth.current_user(), Some(user));

    let blob = storage.read(KEY).unwrap().unwrap();
    assert!(!blob.contains("password"));
    assert!(!blob.contains("argon2"));
}

#[tokio::test]
async fn test_register_failure_uses_server_message() {
    let (users, _storage, auth) = setup();
    *users.fail_with.lock().unwrap() = Some(conflict("Email already registered"));

    let err = auth
        .register("Ann", "ann@example.com", "12345678")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Email already registered");
    assert_eq!(
        auth.snapshot().error.as_deref(),
        Some("Email already registered")
    );
}

#[tokio::test]
async fn test_wrong_password_and_unknown_email_look_alike() {
    let (users, storage, auth) = setup();
    users
        .users
        .lock()
        .unwrap()
        .push(stored_user("ann@example.com", "12345678"));

    let wrong = auth.login("ann@example.com", "87654321").await.unwrap_err();
    let unknown = auth.login("bob@example.com", "12345678").await.unwrap_err();

    assert!(matches!(wrong, AuthError::InvalidCredentials));
    assert!(matches!(unknown, AuthError::InvalidCredentials));
    assert_eq!(wrong.to_string(), unknown.to_string());
    assert_eq!(auth.current_user(), None);
    assert_eq!(storage.read(KEY).unwrap(), None);
}

#[tokio::test]
async fn test_plaintext_account_cannot_log_in() {
    let (users, _storage, auth) = setup();
    let mut legacy = stored_user("ann@example.com", "unused");
    legacy.password = "12345678".into();
    users.users.lock().unwrap().push(legacy);

    let err = auth.login("ann@example.com", "12345678").await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
}

#[tokio::test]
async fn test_login_transport_failure() {
    let (users, _storage, auth) = setup();
    *users.fail_with.lock().unwrap() = Some(not_found());

    let err = auth.login("ann@example.com", "12345678").await.unwrap_err();
    assert_eq!(err.to_string(), LOGIN_FAILED);
    assert_eq!(auth.snapshot().error.as_deref(), Some(LOGIN_FAILED));
    assert_eq!(auth.current_user(), None);
}

#[tokio::test]
async fn test_logout_clears_memory_and_storage() {
    let (users, storage, auth) = setup();
    users
        .users
        .lock()
        .unwrap()
        .push(stored_user("ann@example.com", "12345678"));
    auth.login("ann@example.com", "12345678").await.unwrap();

    auth.logout().unwrap();
    assert_eq!(auth.current_user(), None);
    assert_eq!(storage.read(KEY).unwrap(), None);
}

#[tokio::test]
async fn test_restore_after_restart() {
    let (users, storage, auth) = setup();
    users
        .users
        .lock()
        .unwrap()
        .push(stored_user("ann@example.com", "12345678"));
    let user = auth.login("ann@example.com", "12345678").await.unwrap();
    assert_eq!(user.role, "admin");

    let restarted = AuthStore::new(users, SessionContext::new(storage, KEY));
    assert_eq!(restarted.current_user(), None);
    assert_eq!(restarted.restore(), Some(user.clone()));
    assert_eq!(restarted.current_user(), Some(user));
}
