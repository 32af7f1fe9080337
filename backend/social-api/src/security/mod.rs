/// Security primitives for authentication
///
/// - **password**: Argon2id password hashing and verification
/// - **jwt**: HS256 token issue/verify and bearer-header parsing
pub mod jwt;
pub mod password;

pub use jwt::{bearer_token, issue_token, verify_token, Claims};
pub use password::{hash_password, verify_password};
