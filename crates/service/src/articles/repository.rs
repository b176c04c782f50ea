use async_trait::async_trait;
use uuid::Uuid;

use super::domain::{Article, NewArticle};
use crate::errors::ServiceError;

/// Persistence for articles. Implementations assign `id` and `published_at`.
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    async fn insert(&self, user_id: Uuid, input: NewArticle) -> Result<Article, ServiceError>;
    async fn list(&self) -> Result<Vec<Article>, ServiceError>;
    async fn get(&self, id: Uuid) -> Result<Option<Article>, ServiceError>;
    /// Remove the article and its comments; `false` when nothing matched.
    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError>;
}
