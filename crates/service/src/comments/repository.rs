use async_trait::async_trait;
use uuid::Uuid;

use super::domain::Comment;
use crate::errors::ServiceError;

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Check the article exists and insert atomically.
    /// `None` when the article is missing; nothing is written then.
    async fn insert_for_article(&self, article_id: Uuid, user_id: Uuid, content: &str) -> Result<Option<Comment>, ServiceError>;
    async fn list_by_article(&self, article_id: Uuid) -> Result<Vec<Comment>, ServiceError>;
}
