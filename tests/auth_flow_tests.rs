// SPDX-License-Identifier: MIT

//! Identity lifecycle tests: signup, login, password change, logout, and
//! token validation against the credential store.

mod common;

use common::{auth_service, signup_provider, test_db};
use pulmoscan::error::AppError;
use pulmoscan::services::SignupRequest;

#[tokio::test]
async fn signup_succeeds_once_then_rejects_duplicate_email() {
    let db = test_db().await;
    let auth = auth_service(&db, 30);

    let request = SignupRequest {
        provider_username: "drsmith".to_string(),
        provider_email: "smith@clinic.example".to_string(),
        provider_password: "correct horse".to_string(),
    };

    auth.signup(&request).await.expect("first signup succeeds");

    let second = auth.signup(&request).await;
    assert!(matches!(second, Err(AppError::DuplicateEmail)));
}

#[tokio::test]
async fn concurrent_signups_for_one_email_admit_exactly_one() {
    let db = test_db().await;
    let auth = auth_service(&db, 30);

    // Both requests race to the same email; the schema's UNIQUE constraint
    // decides, and the loser still gets the typed duplicate error.
    let request = SignupRequest {
        provider_username: "drjones".to_string(),
        provider_email: "jones@clinic.example".to_string(),
        provider_password: "correct horse".to_string(),
    };

    let (first, second) = tokio::join!(auth.signup(&request), auth.signup(&request));

    let outcomes = [first, second];
    assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(outcomes
        .iter()
        .any(|r| matches!(r, Err(AppError::DuplicateEmail))));
}

#[tokio::test]
async fn login_returns_token_and_provider_summary() {
    let db = test_db().await;
    let auth = auth_service(&db, 30);
    let provider_id = signup_provider(&auth, &db, "lee@clinic.example")
        .await
        .unwrap();

    let token = auth
        .login("lee@clinic.example", "hunter2!")
        .await
        .expect("login with registered credentials succeeds");

    assert_eq!(token.token_type, "bearer");
    assert_eq!(token.provider_id, provider_id);
    assert_eq!(token.provider_username, "drtest");
    assert_eq!(token.provider_email, "lee@clinic.example");
    assert!(!token.access_token.is_empty());
}

#[tokio::test]
async fn login_with_wrong_password_is_invalid_credentials() {
    let db = test_db().await;
    let auth = auth_service(&db, 30);
    signup_provider(&auth, &db, "wong@clinic.example")
        .await
        .unwrap();

    let result = auth.login("wong@clinic.example", "not the password").await;
    assert!(matches!(result, Err(AppError::InvalidCredentials)));
}

#[tokio::test]
async fn login_with_unknown_email_is_user_not_found() {
    let db = test_db().await;
    let auth = auth_service(&db, 30);

    let result = auth.login("nobody@clinic.example", "whatever").await;
    assert!(matches!(result, Err(AppError::UserNotFound)));
}

#[tokio::test]
async fn change_password_replaces_the_stored_hash() {
    let db = test_db().await;
    let auth = auth_service(&db, 30);
    signup_provider(&auth, &db, "reset@clinic.example")
        .await
        .unwrap();

    auth.change_password("reset@clinic.example", "new password")
        .await
        .expect("password change for known email succeeds");

    // Old password no longer works, new one does.
    let old = auth.login("reset@clinic.example", "hunter2!").await;
    assert!(matches!(old, Err(AppError::InvalidCredentials)));
    auth.login("reset@clinic.example", "new password")
        .await
        .expect("login with new password succeeds");
}

#[tokio::test]
async fn change_password_for_unknown_email_is_user_not_found() {
    let db = test_db().await;
    let auth = auth_service(&db, 30);

    let result = auth.change_password("ghost@clinic.example", "pw").await;
    assert!(matches!(result, Err(AppError::UserNotFound)));
}

#[tokio::test]
async fn logout_requires_an_identity() {
    let db = test_db().await;
    let auth = auth_service(&db, 30);

    let result = auth.logout(None).await;
    assert!(matches!(result, Err(AppError::Unauthorized)));

    auth.logout(Some(1)).await.expect("logout with identity succeeds");
}

#[tokio::test]
async fn validate_token_resolves_subject_to_provider_id() {
    let db = test_db().await;
    let auth = auth_service(&db, 30);
    let provider_id = signup_provider(&auth, &db, "valid@clinic.example")
        .await
        .unwrap();

    let login = auth.login("valid@clinic.example", "hunter2!").await.unwrap();
    let resolved = auth
        .validate_token(&login.access_token)
        .await
        .expect("freshly issued token validates");
    assert_eq!(resolved, provider_id);
}

#[tokio::test]
async fn validate_token_rejects_tampered_token() {
    let db = test_db().await;
    let auth = auth_service(&db, 30);
    signup_provider(&auth, &db, "tamper@clinic.example")
        .await
        .unwrap();

    let login = auth.login("tamper@clinic.example", "hunter2!").await.unwrap();
    let mut tampered = login.access_token;
    tampered.pop();

    let result = auth.validate_token(&tampered).await;
    assert!(matches!(result, Err(AppError::Unauthorized)));
}

#[tokio::test]
async fn validate_token_rejects_unknown_subject() {
    let db = test_db().await;
    let auth = auth_service(&db, 30);

    // Signed correctly, but the subject was never registered.
    let token = auth
        .create_access_token("stranger@clinic.example")
        .unwrap();
    let result = auth.validate_token(&token).await;
    assert!(matches!(result, Err(AppError::Unauthorized)));
}

#[tokio::test]
async fn sensitive_actions_are_audited() {
    let db = test_db().await;
    let auth = auth_service(&db, 30);
    signup_provider(&auth, &db, "audit@clinic.example")
        .await
        .unwrap();
    auth.login("audit@clinic.example", "hunter2!").await.unwrap();
    auth.change_password("audit@clinic.example", "rotated")
        .await
        .unwrap();

    let entries = db.all_audit_entries().await.unwrap();
    let actions: Vec<&str> = entries.iter().map(|e| e.action.as_str()).collect();
    assert_eq!(
        actions,
        vec!["Provider signup", "Provider login", "Password changed"]
    );
}
