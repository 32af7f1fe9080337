/// Post service - creation, retrieval, deletion, and new-post publishing
use super::parse_id;
use crate::db;
use crate::error::{ApiError, FieldErrors, Result};
use crate::events::PostEvents;
use crate::models::Post;
use crate::security::Claims;
use sqlx::PgPool;

#[derive(Clone)]
pub struct PostService {
    pool: PgPool,
    events: PostEvents,
}

impl PostService {
    pub fn new(pool: PgPool, events: PostEvents) -> Self {
        Self { pool, events }
    }

    /// All posts, newest first
    pub async fn list(&self) -> Result<Vec<Post>> {
        db::posts::list_recent(&self.pool).await
    }

    /// Look up a single post
    pub async fn get(&self, post_id: &str) -> Result<Post> {
        let post_id = parse_id(post_id, "Post")?;
        db::posts::find_by_id(&self.pool, post_id)
            .await?
            .ok_or(ApiError::NotFound("Post"))
    }

    /// Create a post owned by the caller and announce it on the bus.
    /// Publishing is fire-and-forget; it cannot fail the mutation.
    pub async fn create(&self, claims: &Claims, body: &str) -> Result<Post> {
        if body.trim().is_empty() {
            let mut errors = FieldErrors::new();
            errors.set("body", "Post body must not be empty");
            return Err(ApiError::Validation(errors));
        }

        let post = db::posts::insert(&self.pool, &claims.username, body).await?;
        tracing::info!(post_id = %post.id, username = %post.username, "post created");

        self.events.publish(&post);

        Ok(post)
    }

    /// Delete a post the caller owns.
    ///
    /// The lookup distinguishes missing from forbidden for the error
    /// taxonomy; the DELETE itself re-asserts ownership in its predicate,
    /// so a concurrent owner change cannot slip through.
    pub async fn delete(&self, claims: &Claims, post_id: &str) -> Result<()> {
        let post_id = parse_id(post_id, "Post")?;

        let post = db::posts::find_by_id(&self.pool, post_id)
            .await?
            .ok_or(ApiError::NotFound("Post"))?;

        if post.username != claims.username {
            return Err(ApiError::Forbidden);
        }

        db::posts::delete_owned(&self.pool, post_id, &claims.username).await?;
        tracing::info!(post_id = %post_id, username = %claims.username, "post deleted");

        Ok(())
    }
}
