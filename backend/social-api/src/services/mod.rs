/// Business logic layer
///
/// - User service: registration and login
/// - Post service: post lifecycle and new-post publishing
/// - Engagement service: comments and like toggling
use crate::error::{ApiError, Result};
use uuid::Uuid;

pub mod engagement;
pub mod posts;
pub mod users;

pub use engagement::EngagementService;
pub use posts::PostService;
pub use users::UserService;

/// Parse a client-supplied id. A string that is not a UUID can reference
/// nothing, so it reports the same way as a missing row.
pub(crate) fn parse_id(value: &str, entity: &'static str) -> Result<Uuid> {
    Uuid::parse_str(value).map_err(|_| ApiError::NotFound(entity))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_accepts_uuid() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string(), "Post").expect("parses"), id);
    }

    #[test]
    fn test_parse_id_maps_garbage_to_not_found() {
        assert!(matches!(
            parse_id("not-a-uuid", "Post"),
            Err(ApiError::NotFound("Post"))
        ));
    }
}
