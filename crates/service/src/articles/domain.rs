use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fields supplied by the caller on create.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewArticle {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
}

/// Persisted article (business view)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub published_at: DateTime<Utc>,
    pub user_id: Uuid,
}

impl Article {
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}

impl From<models::article::Model> for Article {
    fn from(m: models::article::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            content: m.content,
            tags: m.tags,
            published_at: m.published_at.with_timezone(&Utc),
            user_id: m.user_id,
        }
    }
}
