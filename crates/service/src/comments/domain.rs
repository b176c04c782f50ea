use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewComment {
    /// Raw id from the request; unparseable ids behave like missing articles.
    pub article_id: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub content: String,
    pub create_at: DateTime<Utc>,
    pub user_id: Uuid,
    pub article_id: Uuid,
}

impl From<models::comment::Model> for Comment {
    fn from(m: models::comment::Model) -> Self {
        Self {
            id: m.id,
            content: m.content,
            create_at: m.create_at.with_timezone(&Utc),
            user_id: m.user_id,
            article_id: m.article_id,
        }
    }
}
