//! GraphQL subscriptions (WebSocket support)

use async_graphql::{Context, Subscription};
use futures_util::{Stream, StreamExt};
use tokio_stream::wrappers::BroadcastStream;

use crate::events::PostEvents;
use crate::schema::post::Post;

#[derive(Default)]
pub struct SubscriptionRoot;

#[Subscription]
impl SubscriptionRoot {
    /// Emits every post the moment `createPost` persists it. A consumer
    /// that falls behind the channel buffer skips the lagged events and
    /// keeps receiving; the stream only ends when the server shuts down.
    async fn new_post(&self, ctx: &Context<'_>) -> async_graphql::Result<impl Stream<Item = Post>> {
        let events = ctx.data::<PostEvents>()?;

        let stream = BroadcastStream::new(events.subscribe())
            .filter_map(|event| async move { event.ok().map(Post::from) });

        Ok(stream)
    }
}
