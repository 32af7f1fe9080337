//! Comment and like schema

use async_graphql::{Context, ErrorExtensions, Object, Result as GraphQLResult};

use crate::schema::guard;
use crate::schema::post::Post;
use crate::services::EngagementService;

#[derive(Default)]
pub struct EngagementMutation;

#[Object]
impl EngagementMutation {
    async fn create_comment(
        &self,
        ctx: &Context<'_>,
        post_id: String,
        body: String,
    ) -> GraphQLResult<Post> {
        let claims = guard::current_user(ctx).map_err(|e| e.extend())?;
        let engagement = ctx.data::<EngagementService>()?;

        let post = engagement
            .create_comment(&claims, &post_id, &body)
            .await
            .map_err(|e| e.extend())?;

        Ok(post.into())
    }

    async fn delete_comment(
        &self,
        ctx: &Context<'_>,
        post_id: String,
        comment_id: String,
    ) -> GraphQLResult<Post> {
        let claims = guard::current_user(ctx).map_err(|e| e.extend())?;
        let engagement = ctx.data::<EngagementService>()?;

        let post = engagement
            .delete_comment(&claims, &post_id, &comment_id)
            .await
            .map_err(|e| e.extend())?;

        Ok(post.into())
    }

    async fn like_post(&self, ctx: &Context<'_>, post_id: String) -> GraphQLResult<Post> {
        let claims = guard::current_user(ctx).map_err(|e| e.extend())?;
        let engagement = ctx.data::<EngagementService>()?;

        let post = engagement
            .toggle_like(&claims, &post_id)
            .await
            .map_err(|e| e.extend())?;

        Ok(post.into())
    }
}
