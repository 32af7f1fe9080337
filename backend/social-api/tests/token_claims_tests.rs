//! Bearer-token lifecycle tests against the public crate API: what a
//! token carries, when verification rejects it, and how the header
//! parser treats the schemes clients actually send.

use chrono::Utc;
use uuid::Uuid;

use social_api::models::User;
use social_api::security::{bearer_token, issue_token, verify_token};
use social_api::ApiError;

const SECRET: &str = "integration_secret_at_least_32_chars";

fn stored_user(username: &str) -> User {
    User {
        id: Uuid::new_v4(),
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password_hash: "phc-hash".to_string(),
        created_at: Utc::now(),
    }
}

#[test]
fn test_claim_mirrors_the_stored_user() {
    let user = stored_user("alice");
    let token = issue_token(&user, SECRET, 3600).expect("sign");

    let claims = verify_token(&token, SECRET).expect("verify");
    assert_eq!(claims.username, user.username);
    assert_eq!(claims.email, user.email);
    assert_eq!(claims.sub, user.id.to_string());
}

#[test]
fn test_token_carries_one_hour_expiry() {
    let before = Utc::now().timestamp() as usize;
    let token = issue_token(&stored_user("alice"), SECRET, 3600).expect("sign");
    let claims = verify_token(&token, SECRET).expect("verify");

    assert!(claims.exp >= before + 3600);
    assert!(claims.exp <= claims.iat + 3600);
}

#[test]
fn test_verification_is_secret_bound() {
    let token = issue_token(&stored_user("alice"), SECRET, 3600).expect("sign");

    assert!(verify_token(&token, SECRET).is_ok());
    assert!(matches!(
        verify_token(&token, "some_other_secret_32_chars_long!"),
        Err(ApiError::InvalidToken)
    ));
}

#[test]
fn test_two_users_never_share_a_token() {
    let alice = issue_token(&stored_user("alice"), SECRET, 3600).expect("sign");
    let bob = issue_token(&stored_user("bob"), SECRET, 3600).expect("sign");
    assert_ne!(alice, bob);

    assert_eq!(verify_token(&alice, SECRET).expect("verify").username, "alice");
    assert_eq!(verify_token(&bob, SECRET).expect("verify").username, "bob");
}

#[test]
fn test_bearer_scheme_variants() {
    let token = issue_token(&stored_user("alice"), SECRET, 3600).expect("sign");

    let header = format!("Bearer {token}");
    let extracted = bearer_token(&header).expect("extract");
    assert!(verify_token(extracted, SECRET).is_ok());

    for bad in [token.as_str(), "Bearer", "Bearer ", "bearer lowercase-scheme"] {
        assert!(
            matches!(bearer_token(bad), Err(ApiError::AuthenticationRequired)),
            "expected scheme rejection for {bad:?}"
        );
    }
}
