/// Engagement service - comments and like toggling on posts
use super::parse_id;
use crate::db;
use crate::error::{ApiError, FieldErrors, Result};
use crate::models::Post;
use crate::security::Claims;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct EngagementService {
    pool: PgPool,
}

impl EngagementService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn require_post(&self, post_id: Uuid) -> Result<Post> {
        db::posts::find_by_id(&self.pool, post_id)
            .await?
            .ok_or(ApiError::NotFound("Post"))
    }

    /// Add a comment to a post. Comments present newest-first, so the new
    /// row appears at the head of the list on the returned post.
    pub async fn create_comment(
        &self,
        claims: &Claims,
        post_id: &str,
        body: &str,
    ) -> Result<Post> {
        if body.trim().is_empty() {
            let mut errors = FieldErrors::new();
            errors.set("body", "Comment must not be empty");
            return Err(ApiError::Validation(errors));
        }

        let post_id = parse_id(post_id, "Post")?;
        let post = self.require_post(post_id).await?;

        db::comments::insert(&self.pool, post_id, &claims.username, body).await?;
        tracing::info!(post_id = %post_id, username = %claims.username, "comment created");

        Ok(post)
    }

    /// Remove a comment the caller authored.
    pub async fn delete_comment(
        &self,
        claims: &Claims,
        post_id: &str,
        comment_id: &str,
    ) -> Result<Post> {
        let post_id = parse_id(post_id, "Post")?;
        let comment_id = parse_id(comment_id, "Comment")?;

        let post = self.require_post(post_id).await?;

        let comment = db::comments::find_by_id(&self.pool, post_id, comment_id)
            .await?
            .ok_or(ApiError::NotFound("Comment"))?;

        if comment.username != claims.username {
            return Err(ApiError::Forbidden);
        }

        db::comments::delete_authored(&self.pool, comment_id, &claims.username).await?;
        tracing::info!(post_id = %post_id, comment_id = %comment_id, "comment deleted");

        Ok(post)
    }

    /// Toggle the caller's like on a post: present removes, absent adds.
    /// Both arms are single conditional statements, so concurrent toggles
    /// by different users interleave without losing updates.
    pub async fn toggle_like(&self, claims: &Claims, post_id: &str) -> Result<Post> {
        let post_id = parse_id(post_id, "Post")?;
        let post = self.require_post(post_id).await?;

        if db::likes::remove(&self.pool, post_id, &claims.username).await? {
            tracing::debug!(post_id = %post_id, username = %claims.username, "post unliked");
        } else {
            db::likes::insert_if_absent(&self.pool, post_id, &claims.username).await?;
            tracing::debug!(post_id = %post_id, username = %claims.username, "post liked");
        }

        Ok(post)
    }
}
