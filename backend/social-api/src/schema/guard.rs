//! Per-operation authentication guard.
//!
//! The HTTP handler injects the raw `Authorization` header value into the
//! request data; operations that need an identity call [`current_user`]
//! to turn it into a verified claim. Operations without the requirement
//! never look at the header at all.

use crate::config::JwtSettings;
use crate::error::{ApiError, Result};
use crate::security::{bearer_token, verify_token, Claims};
use async_graphql::Context;

/// Raw `Authorization` header value, injected per request when present.
pub struct AuthHeader(pub String);

/// Resolve the calling identity or fail.
///
/// Missing header or a non-Bearer scheme is `AuthenticationRequired`;
/// a present token that fails signature or expiry checks is
/// `InvalidToken`.
pub fn current_user(ctx: &Context<'_>) -> Result<Claims> {
    let jwt = ctx
        .data_opt::<JwtSettings>()
        .ok_or_else(|| ApiError::Internal("JWT settings missing from schema data".to_string()))?;

    let header = ctx
        .data_opt::<AuthHeader>()
        .ok_or(ApiError::AuthenticationRequired)?;

    let token = bearer_token(&header.0)?;
    verify_token(token, &jwt.secret)
}
