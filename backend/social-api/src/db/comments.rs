/// Comment database operations
use crate::error::Result;
use crate::models::Comment;
use sqlx::PgPool;
use uuid::Uuid;

/// Insert a new comment on a post
pub async fn insert(pool: &PgPool, post_id: Uuid, username: &str, body: &str) -> Result<Comment> {
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        INSERT INTO comments (post_id, username, body)
        VALUES ($1, $2, $3)
        RETURNING id, post_id, username, body, created_at
        "#,
    )
    .bind(post_id)
    .bind(username)
    .bind(body)
    .fetch_one(pool)
    .await?;

    Ok(comment)
}

/// Find a comment by ID, scoped to its post
pub async fn find_by_id(
    pool: &PgPool,
    post_id: Uuid,
    comment_id: Uuid,
) -> Result<Option<Comment>> {
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        SELECT id, post_id, username, body, created_at
        FROM comments
        WHERE id = $1 AND post_id = $2
        "#,
    )
    .bind(comment_id)
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    Ok(comment)
}

/// Comments for a post, newest first
pub async fn list_by_post(pool: &PgPool, post_id: Uuid) -> Result<Vec<Comment>> {
    let comments = sqlx::query_as::<_, Comment>(
        r#"
        SELECT id, post_id, username, body, created_at
        FROM comments
        WHERE post_id = $1
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(post_id)
    .fetch_all(pool)
    .await?;

    Ok(comments)
}

/// Count comments for a post
pub async fn count_by_post(pool: &PgPool, post_id: Uuid) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE post_id = $1")
        .bind(post_id)
        .fetch_one(pool)
        .await?;

    Ok(count)
}

/// Delete a comment only if `username` authored it. The author predicate
/// rides inside the DELETE so a racing edit cannot slip between check and
/// removal.
pub async fn delete_authored(pool: &PgPool, comment_id: Uuid, username: &str) -> Result<u64> {
    let result = sqlx::query("DELETE FROM comments WHERE id = $1 AND username = $2")
        .bind(comment_id)
        .bind(username)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
