//! New-post notification bus.
//!
//! A broadcast channel owned by the server process and handed to the
//! GraphQL schema as data; it is dropped (and every subscriber stream
//! ends) when the server shuts down. Publishing is fire-and-forget: a
//! post mutation never fails because nobody is listening.

use crate::models::Post;
use tokio::sync::broadcast;

#[derive(Clone)]
pub struct PostEvents {
    tx: broadcast::Sender<Post>,
}

impl PostEvents {
    /// Create a bus with the given per-subscriber buffer capacity.
    /// Subscribers that fall more than `capacity` events behind skip the
    /// lagged events rather than erroring out.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publish a new post to all current subscribers. Fire-and-forget.
    pub fn publish(&self, post: &Post) {
        if self.tx.send(post.clone()).is_err() {
            tracing::debug!(post_id = %post.id, "new-post event dropped: no subscribers");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Post> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for PostEvents {
    fn default() -> Self {
        Self::new(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn sample_post() -> Post {
        Post {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            body: "hello".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_publish_reaches_subscriber() {
        let bus = PostEvents::new(8);
        let mut rx = bus.subscribe();

        let post = sample_post();
        bus.publish(&post);

        let received = rx.recv().await.expect("event should arrive");
        assert_eq!(received.id, post.id);
        assert_eq!(received.body, "hello");
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_a_noop() {
        let bus = PostEvents::new(8);
        assert_eq!(bus.subscriber_count(), 0);
        // Must not panic or error.
        bus.publish(&sample_post());
    }

    #[tokio::test]
    async fn test_each_subscriber_sees_every_event() {
        let bus = PostEvents::new(8);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        let post = sample_post();
        bus.publish(&post);

        assert_eq!(rx1.recv().await.expect("rx1").id, post.id);
        assert_eq!(rx2.recv().await.expect("rx2").id, post.id);
    }
}
