//! Input validation for register and login.
//!
//! Validators are pure: they collect every failing field into a
//! [`FieldErrors`] aggregate instead of short-circuiting, so clients see
//! all problems in one response.

use crate::error::FieldErrors;
use once_cell::sync::Lazy;
use regex::Regex;

// Basic `local@domain` shape check. This is deliberately not RFC 5322;
// it rejects whitespace and missing parts, nothing more.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)*$")
        .expect("hardcoded email regex is invalid - fix source code")
});

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Validate registration input. Password mismatch is only reported when
/// the password itself is non-empty, so an empty password yields a single
/// error rather than two.
pub fn validate_register_input(
    username: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if is_blank(username) {
        errors.set("username", "Username must not be empty");
    }

    if is_blank(email) {
        errors.set("email", "Email must not be empty");
    } else if !EMAIL_REGEX.is_match(email) {
        errors.set("email", "Email must be a valid email address");
    }

    if password.is_empty() {
        errors.set("password", "Password must not be empty");
    } else if password != confirm_password {
        errors.set("confirmPassword", "Passwords must match");
    }

    errors
}

/// Validate login input.
pub fn validate_login_input(username: &str, password: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if is_blank(username) {
        errors.set("username", "Username must not be empty");
    }

    if password.is_empty() {
        errors.set("password", "Password must not be empty");
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_register_input() {
        let errors = validate_register_input("alice", "alice@example.com", "hunter2!", "hunter2!");
        assert!(errors.is_empty());
    }

    #[test]
    fn test_blank_fields_are_aggregated() {
        let errors = validate_register_input("   ", "", "", "");
        assert_eq!(errors.get("username"), Some("Username must not be empty"));
        assert_eq!(errors.get("email"), Some("Email must not be empty"));
        assert_eq!(errors.get("password"), Some("Password must not be empty"));
        // Mismatch is not reported for an empty password.
        assert_eq!(errors.get("confirmPassword"), None);
    }

    #[test]
    fn test_invalid_email_shape() {
        for email in ["invalid", "@example.com", "user@", "a b@example.com"] {
            let errors = validate_register_input("alice", email, "pw", "pw");
            assert_eq!(
                errors.get("email"),
                Some("Email must be a valid email address"),
                "expected shape failure for {email:?}"
            );
        }
    }

    #[test]
    fn test_email_shape_accepts_bare_domain() {
        // No TLD requirement; this is a shape check, not deliverability.
        let errors = validate_register_input("alice", "alice@localhost", "pw", "pw");
        assert!(errors.is_empty());
    }

    #[test]
    fn test_password_mismatch() {
        let errors = validate_register_input("alice", "alice@example.com", "pw1", "pw2");
        assert_eq!(errors.get("confirmPassword"), Some("Passwords must match"));
        assert_eq!(errors.get("password"), None);
    }

    #[test]
    fn test_login_input() {
        assert!(validate_login_input("alice", "pw").is_empty());

        let errors = validate_login_input(" ", "");
        assert_eq!(errors.get("username"), Some("Username must not be empty"));
        assert_eq!(errors.get("password"), Some("Password must not be empty"));
    }
}
