/// Data models for the social API
///
/// Rows map 1:1 onto the tables in `migrations/`. Comments and likes are
/// child rows of a post; the GraphQL layer presents them inline on `Post`.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Account record. Immutable after registration in this service's scope.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Post record. `username` is the denormalized owner handle; ownership
/// checks compare against it directly.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: Uuid,
    pub username: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Comment on a post, deletable only by its author.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub username: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Like membership row. At most one per (post, username).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Like {
    pub id: Uuid,
    pub post_id: Uuid,
    pub username: String,
    pub created_at: DateTime<Utc>,
}
