//! Token issue and verification (HS256, shared secret).
//!
//! The claim carries the identity fields resolvers need (user id,
//! username, email) and is reconstructed per request; nothing here is
//! persisted.

use crate::error::{ApiError, Result};
use crate::models::User;
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Identity claim carried by a bearer token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    pub username: String,
    pub email: String,
    /// Issued at, seconds since epoch
    pub iat: usize,
    /// Expiration time, seconds since epoch
    pub exp: usize,
}

/// Sign a token for a user with the given lifetime.
pub fn issue_token(user: &User, secret: &str, expiry_secs: i64) -> Result<String> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: user.id.to_string(),
        username: user.username.clone(),
        email: user.email.clone(),
        iat: now as usize,
        exp: (now + expiry_secs) as usize,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(format!("Token signing failed: {}", e)))
}

/// Verify a token's signature and expiry, yielding the decoded claim.
/// Every verification failure collapses to `InvalidToken`; callers never
/// learn whether the signature or the expiry was at fault.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )?;

    Ok(token_data.claims)
}

/// Extract the token segment from an `Authorization` header value.
/// The header must use the Bearer scheme with a non-empty token.
pub fn bearer_token(header: &str) -> Result<&str> {
    let token = header
        .strip_prefix("Bearer ")
        .ok_or(ApiError::AuthenticationRequired)?;

    if token.is_empty() {
        return Err(ApiError::AuthenticationRequired);
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use uuid::Uuid;

    const SECRET: &str = "test_secret_key_32_chars_minimum";

    fn test_user() -> User {
        User {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "phc-hash".to_string(),
            created_at: DateTime::<Utc>::from_timestamp(1_700_000_000, 0)
                .expect("valid timestamp"),
        }
    }

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let user = test_user();
        let token = issue_token(&user, SECRET, 3600).expect("should sign");

        let claims = verify_token(&token, SECRET).expect("should verify");
        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.email, "alice@example.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let token = issue_token(&test_user(), SECRET, -3600).expect("should sign");
        let result = verify_token(&token, SECRET);
        assert!(matches!(result, Err(ApiError::InvalidToken)));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = issue_token(&test_user(), SECRET, 3600).expect("should sign");
        let result = verify_token(&token, "another_secret_entirely_here_ok");
        assert!(matches!(result, Err(ApiError::InvalidToken)));
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let token = issue_token(&test_user(), SECRET, 3600).expect("should sign");
        let tampered = format!("{}x", token);
        assert!(matches!(
            verify_token(&tampered, SECRET),
            Err(ApiError::InvalidToken)
        ));
    }

    #[test]
    fn test_bearer_token_extraction() {
        assert_eq!(bearer_token("Bearer abc.def.ghi").expect("ok"), "abc.def.ghi");

        for header in ["abc.def.ghi", "bearer abc", "Bearer", "Bearer ", "Basic abc"] {
            assert!(
                matches!(bearer_token(header), Err(ApiError::AuthenticationRequired)),
                "expected rejection for {header:?}"
            );
        }
    }
}
