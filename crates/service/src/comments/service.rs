use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use super::domain::{Comment, NewComment};
use super::repository::CommentRepository;
use crate::errors::ServiceError;
use crate::parse_id;

pub struct CommentService {
    repo: Arc<dyn CommentRepository>,
}

impl CommentService {
    pub fn new(repo: Arc<dyn CommentRepository>) -> Self { Self { repo } }

    /// Comment on an existing article as `caller`.
    #[instrument(skip(self, input), fields(user_id = %caller, article_id = %input.article_id))]
    pub async fn create(&self, caller: Uuid, input: NewComment) -> Result<Comment, ServiceError> {
        let article_id = parse_id(&input.article_id).ok_or_else(|| ServiceError::not_found("article"))?;
        let comment = self
            .repo
            .insert_for_article(article_id, caller, &input.content)
            .await?
            .ok_or_else(|| ServiceError::not_found("article"))?;
        info!(id = %comment.id, article_id = %article_id, "comment_created");
        Ok(comment)
    }

    /// Comments of one article. Unknown articles simply have none.
    pub async fn list_by_article(&self, article_id: &str) -> Result<Vec<Comment>, ServiceError> {
        match parse_id(article_id) {
            Some(id) => self.repo.list_by_article(id).await,
            None => Ok(Vec::new()),
        }
    }
}
