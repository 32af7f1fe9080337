/// Post database operations
use crate::error::Result;
use crate::models::Post;
use sqlx::PgPool;
use uuid::Uuid;

/// Insert a new post owned by `username`
pub async fn insert(pool: &PgPool, username: &str, body: &str) -> Result<Post> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (username, body)
        VALUES ($1, $2)
        RETURNING id, username, body, created_at
        "#,
    )
    .bind(username)
    .bind(body)
    .fetch_one(pool)
    .await?;

    Ok(post)
}

/// Find a post by ID
pub async fn find_by_id(pool: &PgPool, post_id: Uuid) -> Result<Option<Post>> {
    let post = sqlx::query_as::<_, Post>(
        "SELECT id, username, body, created_at FROM posts WHERE id = $1",
    )
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

/// All posts, newest first. Full-table semantics; acceptable at the small
/// scale this service targets.
pub async fn list_recent(pool: &PgPool) -> Result<Vec<Post>> {
    let posts = sqlx::query_as::<_, Post>(
        "SELECT id, username, body, created_at FROM posts ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Delete a post only if `username` owns it. Returns the number of rows
/// removed; the owner predicate makes check and delete one statement.
pub async fn delete_owned(pool: &PgPool, post_id: Uuid, username: &str) -> Result<u64> {
    let result = sqlx::query("DELETE FROM posts WHERE id = $1 AND username = $2")
        .bind(post_id)
        .bind(username)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
