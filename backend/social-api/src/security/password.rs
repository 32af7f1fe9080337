/// Password hashing and verification using Argon2id
use crate::error::{ApiError, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Hash a password using Argon2id with a random per-password salt.
///
/// Returns a PHC-formatted hash string safe for database storage. The
/// default cost parameters land in the ~100ms range, which is the point:
/// verification is intentionally slow.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| ApiError::Internal(format!("Password hashing failed: {}", e)))?
        .to_string();

    Ok(password_hash)
}

/// Verify a password against its stored PHC-formatted hash.
///
/// Returns `false` on mismatch; any other verifier failure (corrupt hash,
/// unsupported parameters) surfaces as an internal error.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| ApiError::Internal(format!("Invalid password hash format: {}", e)))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(_) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(ApiError::Internal(format!(
            "Password verification failed: {}",
            e
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let password = "hunter2!";
        let hash = hash_password(password).expect("should hash password successfully");
        assert!(verify_password(password, &hash).expect("should verify successfully"));
    }

    #[test]
    fn test_verify_wrong_password() {
        let hash = hash_password("hunter2!").expect("should hash password successfully");
        assert!(!verify_password("not-hunter2", &hash).expect("verification should succeed"));
    }

    #[test]
    fn test_different_hashes_for_same_password() {
        let hash1 = hash_password("hunter2!").expect("should hash successfully");
        let hash2 = hash_password("hunter2!").expect("should hash successfully");
        // Different salts should produce different hashes
        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_corrupt_hash_is_an_error() {
        let result = verify_password("hunter2!", "not-a-phc-string");
        assert!(matches!(result, Err(ApiError::Internal(_))));
    }
}
