/// Like database operations
///
/// Like membership is toggled with two conditional statements instead of
/// a read-modify-write of the whole post, so concurrent likes from
/// different users cannot lose each other's updates.
use crate::error::Result;
use crate::models::Like;
use sqlx::PgPool;
use uuid::Uuid;

/// Remove a user's like from a post. Returns `true` when a like existed
/// and was removed.
pub async fn remove(pool: &PgPool, post_id: Uuid, username: &str) -> Result<bool> {
    let result = sqlx::query("DELETE FROM likes WHERE post_id = $1 AND username = $2")
        .bind(post_id)
        .bind(username)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Add a user's like to a post. `ON CONFLICT DO NOTHING` rides on the
/// UNIQUE (post_id, username) constraint: a concurrent duplicate insert
/// quietly becomes a no-op and the at-most-one invariant holds.
pub async fn insert_if_absent(pool: &PgPool, post_id: Uuid, username: &str) -> Result<bool> {
    let result = sqlx::query(
        r#"
        INSERT INTO likes (post_id, username)
        VALUES ($1, $2)
        ON CONFLICT (post_id, username) DO NOTHING
        "#,
    )
    .bind(post_id)
    .bind(username)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Likes for a post, in the order they arrived
pub async fn list_by_post(pool: &PgPool, post_id: Uuid) -> Result<Vec<Like>> {
    let likes = sqlx::query_as::<_, Like>(
        r#"
        SELECT id, post_id, username, created_at
        FROM likes
        WHERE post_id = $1
        ORDER BY created_at ASC, id ASC
        "#,
    )
    .bind(post_id)
    .fetch_all(pool)
    .await?;

    Ok(likes)
}

/// Count likes for a post
pub async fn count_by_post(pool: &PgPool, post_id: Uuid) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM likes WHERE post_id = $1")
        .bind(post_id)
        .fetch_one(pool)
        .await?;

    Ok(count)
}
