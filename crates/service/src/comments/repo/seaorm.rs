use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DbErr, SqlErr, TransactionTrait};
use tracing::debug;
use uuid::Uuid;

use crate::comments::domain::Comment;
use crate::comments::repository::CommentRepository;
use crate::errors::ServiceError;

const ARTICLE_FK: &str = "fk_comment_article";

pub struct SeaOrmCommentRepository {
    pub db: DatabaseConnection,
}

fn db_err(e: DbErr) -> ServiceError {
    ServiceError::Db(e.to_string())
}

fn is_missing_article(e: &DbErr) -> bool {
    matches!(e.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(msg)) if msg.contains(ARTICLE_FK))
}

#[async_trait]
impl CommentRepository for SeaOrmCommentRepository {
    async fn insert_for_article(&self, article_id: Uuid, user_id: Uuid, content: &str) -> Result<Option<Comment>, ServiceError> {
        let txn = self.db.begin().await.map_err(db_err)?;

        // FOR SHARE: a concurrent delete waits for this transaction
        if models::article::find_for_share(&txn, article_id).await?.is_none() {
            txn.rollback().await.map_err(db_err)?;
            return Ok(None);
        }

        match models::comment::create(&txn, article_id, user_id, content).await {
            Ok(m) => {
                txn.commit().await.map_err(db_err)?;
                Ok(Some(m.into()))
            }
            Err(e) if is_missing_article(&e) => {
                debug!(article_id = %article_id, "article vanished before comment insert");
                txn.rollback().await.map_err(db_err)?;
                Ok(None)
            }
            Err(e) => Err(db_err(e)),
        }
    }

    async fn list_by_article(&self, article_id: Uuid) -> Result<Vec<Comment>, ServiceError> {
        let rows = models::comment::list_by_article(&self.db, article_id).await?;
        Ok(rows.into_iter().map(Comment::from).collect())
    }
}
