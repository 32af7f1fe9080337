/// Database access layer
///
/// Repository functions per entity, each taking a `&PgPool`. Mutations
/// that enforce a rule (ownership, uniqueness) carry the predicate inside
/// the SQL statement so the check and the write are one atomic step.
pub mod comments;
pub mod likes;
pub mod posts;
pub mod users;
