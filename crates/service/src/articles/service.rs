use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use super::domain::{Article, NewArticle};
use super::repository::ArticleRepository;
use crate::errors::ServiceError;
use crate::parse_id;

/// Message for both "missing" and "not yours" so non-owners learn nothing.
pub const DELETE_DENIED: &str = "no access or article not found";

/// Application service encapsulating article business rules.
pub struct ArticleService {
    repo: Arc<dyn ArticleRepository>,
}

impl ArticleService {
    pub fn new(repo: Arc<dyn ArticleRepository>) -> Self { Self { repo } }

    #[instrument(skip(self, input), fields(user_id = %caller, tags = input.tags.len()))]
    pub async fn create(&self, caller: Uuid, input: NewArticle) -> Result<Article, ServiceError> {
        models::article::validate_title(&input.title).map_err(ServiceError::from_model)?;
        let article = self.repo.insert(caller, input).await?;
        info!(id = %article.id, user_id = %caller, "article_created");
        Ok(article)
    }

    pub async fn list(&self) -> Result<Vec<Article>, ServiceError> {
        self.repo.list().await
    }

    /// Exact lookup; ids that are not UUIDs cannot match and yield `NotFound`.
    pub async fn get(&self, id: &str) -> Result<Article, ServiceError> {
        let Some(id) = parse_id(id) else {
            return Err(ServiceError::not_found("article"));
        };
        self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("article"))
    }

    /// Delete an article owned by `caller`.
    ///
    /// A missing article and someone else's article both fail with the same
    /// `Forbidden`.
    #[instrument(skip(self), fields(user_id = %caller))]
    pub async fn delete(&self, caller: Uuid, id: &str) -> Result<(), ServiceError> {
        let denied = || ServiceError::Forbidden(DELETE_DENIED.into());
        let id = parse_id(id).ok_or_else(denied)?;
        match self.repo.get(id).await? {
            Some(article) if article.is_owned_by(caller) => {
                self.repo.delete(id).await?;
                info!(id = %id, "article_deleted");
                Ok(())
            }
            _ => Err(denied()),
        }
    }
}
