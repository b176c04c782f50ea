//! Service layer providing the article, comment and auth workflows on top of models.
//! - Separates business rules (ownership, existence checks) from data access.
//! - Each workflow talks to a repository trait with SeaORM and in-memory implementations.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod auth;
pub mod articles;
pub mod comments;
pub mod storage;
#[cfg(test)]
pub mod test_support;

/// Ids only match in their canonical form: lowercase, hyphenated, unpadded.
pub(crate) fn parse_id(raw: &str) -> Option<uuid::Uuid> {
    uuid::Uuid::parse_str(raw).ok().filter(|id| id.to_string() == raw)
}
