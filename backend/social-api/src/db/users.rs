/// User database operations
use crate::error::{ApiError, Result};
use crate::models::User;
use sqlx::PgPool;

/// Insert a new user. The UNIQUE constraint on username backs the
/// application-level pre-check; a violation maps to `Conflict` so the
/// race between check and insert still surfaces as "taken".
pub async fn insert(
    pool: &PgPool,
    username: &str,
    email: &str,
    password_hash: &str,
) -> Result<User> {
    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (username, email, password_hash)
        VALUES ($1, $2, $3)
        RETURNING id, username, email, password_hash, created_at
        "#,
    )
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .fetch_one(pool)
    .await
    .map_err(|err| {
        if let sqlx::Error::Database(db) = &err {
            if db.is_unique_violation() {
                return ApiError::Conflict("Username is taken".to_string());
            }
        }
        ApiError::from(err)
    })?;

    Ok(user)
}

/// Find user by exact username (case-sensitive)
pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, username, email, password_hash, created_at FROM users WHERE username = $1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}
