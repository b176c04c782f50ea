use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::articles::domain::{Article, NewArticle};
use crate::articles::repository::ArticleRepository;
use crate::errors::ServiceError;

/// SeaORM-backed repository implementation.
pub struct SeaOrmArticleRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl ArticleRepository for SeaOrmArticleRepository {
    async fn insert(&self, user_id: Uuid, input: NewArticle) -> Result<Article, ServiceError> {
        let m = models::article::create(&self.db, user_id, &input.title, &input.content, input.tags)
            .await
            .map_err(ServiceError::from_model)?;
        Ok(m.into())
    }

    async fn list(&self) -> Result<Vec<Article>, ServiceError> {
        let rows = models::article::list_all(&self.db).await?;
        Ok(rows.into_iter().map(Article::from).collect())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Article>, ServiceError> {
        Ok(models::article::find(&self.db, id).await?.map(Article::from))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        // comment rows go with it through ON DELETE CASCADE
        Ok(models::article::delete(&self.db, id).await?)
    }
}
