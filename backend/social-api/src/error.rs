use async_graphql::ErrorExtensions;
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

/// Aggregate of per-field validation messages, keyed by the GraphQL input
/// field name. Callers collect every failing field before surfacing, so a
/// single response reports all of them at once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for the single "general" entry used by login failures.
    pub fn general(message: &str) -> Self {
        let mut errors = Self::new();
        errors.set("general", message);
        errors
    }

    pub fn set(&mut self, field: &str, message: &str) {
        self.0.insert(field.to_string(), message.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid input")]
    Validation(FieldErrors),

    #[error("Authorization header must be `Bearer <token>`")]
    AuthenticationRequired,

    #[error("Invalid/Expired token")]
    InvalidToken,

    #[error("Action not allowed")]
    Forbidden,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Stable machine-readable code carried in GraphQL error extensions.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION_FAILED",
            ApiError::AuthenticationRequired => "AUTHENTICATION_REQUIRED",
            ApiError::InvalidToken => "INVALID_TOKEN",
            ApiError::Forbidden => "FORBIDDEN",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::Database(_) | ApiError::Internal(_) => "INTERNAL",
        }
    }

    /// Message safe to hand to API clients. Storage and internal failures
    /// are logged server-side and collapsed so driver detail never leaks.
    fn public_message(&self) -> String {
        match self {
            ApiError::Database(_) | ApiError::Internal(_) => {
                "Internal server error".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> async_graphql::Error {
        if let ApiError::Database(detail) | ApiError::Internal(detail) = self {
            tracing::error!(code = self.code(), "request failed: {}", detail);
        }

        let code = self.code();
        let field_errors = match self {
            ApiError::Validation(fields) => serde_json::to_value(fields)
                .ok()
                .and_then(|v| async_graphql::Value::from_json(v).ok()),
            _ => None,
        };

        async_graphql::Error::new(self.public_message()).extend_with(|_, e| {
            e.set("code", code);
            if let Some(fields) = field_errors {
                e.set("fieldErrors", fields);
            }
        })
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::Database(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for ApiError {
    fn from(_: jsonwebtoken::errors::Error) -> Self {
        ApiError::InvalidToken
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_map_to_taxonomy() {
        assert_eq!(
            ApiError::Validation(FieldErrors::new()).code(),
            "VALIDATION_FAILED"
        );
        assert_eq!(
            ApiError::AuthenticationRequired.code(),
            "AUTHENTICATION_REQUIRED"
        );
        assert_eq!(ApiError::InvalidToken.code(), "INVALID_TOKEN");
        assert_eq!(ApiError::Forbidden.code(), "FORBIDDEN");
        assert_eq!(ApiError::NotFound("post").code(), "NOT_FOUND");
        assert_eq!(ApiError::Conflict("taken".into()).code(), "CONFLICT");
        assert_eq!(ApiError::Database("boom".into()).code(), "INTERNAL");
    }

    #[test]
    fn test_internal_detail_is_not_leaked() {
        let err = ApiError::Database("connection refused at 10.0.0.5".into());
        let gql = err.extend();
        assert_eq!(gql.message, "Internal server error");
    }

    #[test]
    fn test_validation_extension_carries_field_errors() {
        let mut fields = FieldErrors::new();
        fields.set("body", "Post body must not be empty");
        let gql = ApiError::Validation(fields).extend();

        let json = serde_json::to_value(&gql.extensions).expect("extensions serialize");
        assert_eq!(json["code"], "VALIDATION_FAILED");
        assert_eq!(json["fieldErrors"]["body"], "Post body must not be empty");
    }

    #[test]
    fn test_field_errors_aggregate() {
        let mut errors = FieldErrors::new();
        assert!(errors.is_empty());
        errors.set("username", "Username must not be empty");
        errors.set("email", "Email must not be empty");
        assert!(!errors.is_empty());
        assert_eq!(errors.get("username"), Some("Username must not be empty"));
        assert_eq!(errors.get("password"), None);
    }
}
