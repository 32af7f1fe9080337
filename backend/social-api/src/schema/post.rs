//! Post schema and resolvers.
//!
//! `Post` presents its engagement rows inline: `comments`, `likes`, and
//! the derived counts resolve lazily against the database, so a mutation
//! that returns a post always reflects the freshly persisted state.

use async_graphql::{
    ComplexObject, Context, ErrorExtensions, Object, Result as GraphQLResult, SimpleObject,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::models;
use crate::schema::guard;
use crate::services::PostService;

#[derive(SimpleObject, Clone, Debug)]
#[graphql(complex)]
pub struct Post {
    #[graphql(skip)]
    pub record_id: Uuid,
    pub body: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl From<models::Post> for Post {
    fn from(post: models::Post) -> Self {
        Post {
            record_id: post.id,
            body: post.body,
            username: post.username,
            created_at: post.created_at,
        }
    }
}

#[ComplexObject]
impl Post {
    async fn id(&self) -> String {
        self.record_id.to_string()
    }

    /// Comments, most recent first
    async fn comments(&self, ctx: &Context<'_>) -> GraphQLResult<Vec<Comment>> {
        let pool = ctx.data::<PgPool>()?;
        let comments = db::comments::list_by_post(pool, self.record_id)
            .await
            .map_err(|e| e.extend())?;
        Ok(comments.into_iter().map(Comment::from).collect())
    }

    /// Likes, in the order they arrived
    async fn likes(&self, ctx: &Context<'_>) -> GraphQLResult<Vec<Like>> {
        let pool = ctx.data::<PgPool>()?;
        let likes = db::likes::list_by_post(pool, self.record_id)
            .await
            .map_err(|e| e.extend())?;
        Ok(likes.into_iter().map(Like::from).collect())
    }

    async fn comment_count(&self, ctx: &Context<'_>) -> GraphQLResult<i64> {
        let pool = ctx.data::<PgPool>()?;
        db::comments::count_by_post(pool, self.record_id)
            .await
            .map_err(|e| e.extend())
    }

    async fn like_count(&self, ctx: &Context<'_>) -> GraphQLResult<i64> {
        let pool = ctx.data::<PgPool>()?;
        db::likes::count_by_post(pool, self.record_id)
            .await
            .map_err(|e| e.extend())
    }
}

#[derive(SimpleObject, Clone, Debug, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub username: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl From<models::Comment> for Comment {
    fn from(comment: models::Comment) -> Self {
        Comment {
            id: comment.id.to_string(),
            username: comment.username,
            body: comment.body,
            created_at: comment.created_at,
        }
    }
}

#[derive(SimpleObject, Clone, Debug, Serialize, Deserialize)]
pub struct Like {
    pub id: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl From<models::Like> for Like {
    fn from(like: models::Like) -> Self {
        Like {
            id: like.id.to_string(),
            username: like.username,
            created_at: like.created_at,
        }
    }
}

#[derive(Default)]
pub struct PostQuery;

#[Object]
impl PostQuery {
    /// All posts, newest first
    async fn get_posts(&self, ctx: &Context<'_>) -> GraphQLResult<Vec<Post>> {
        let posts = ctx.data::<PostService>()?;
        let posts = posts.list().await.map_err(|e| e.extend())?;
        Ok(posts.into_iter().map(Post::from).collect())
    }

    async fn get_post(&self, ctx: &Context<'_>, post_id: String) -> GraphQLResult<Post> {
        let posts = ctx.data::<PostService>()?;
        let post = posts.get(&post_id).await.map_err(|e| e.extend())?;
        Ok(post.into())
    }
}

#[derive(Default)]
pub struct PostMutation;

#[Object]
impl PostMutation {
    async fn create_post(&self, ctx: &Context<'_>, body: String) -> GraphQLResult<Post> {
        let claims = guard::current_user(ctx).map_err(|e| e.extend())?;
        let posts = ctx.data::<PostService>()?;

        let post = posts.create(&claims, &body).await.map_err(|e| e.extend())?;
        Ok(post.into())
    }

    async fn delete_post(&self, ctx: &Context<'_>, post_id: String) -> GraphQLResult<String> {
        let claims = guard::current_user(ctx).map_err(|e| e.extend())?;
        let posts = ctx.data::<PostService>()?;

        posts
            .delete(&claims, &post_id)
            .await
            .map_err(|e| e.extend())?;

        Ok("Post deleted successfully".to_string())
    }
}
