use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::articles::domain::{Article, NewArticle};
use crate::articles::repository::ArticleRepository;
use crate::auth::domain::{AuthUser, Credentials, NewAccount};
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;
use crate::comments::domain::Comment;
use crate::comments::repository::CommentRepository;
use crate::errors::ServiceError;
use models::errors::ModelError;

fn invalid(e: ModelError) -> AuthError {
    match e {
        ModelError::Validation(msg) => AuthError::Validation(msg),
        other => AuthError::Storage(other.to_string()),
    }
}

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, AuthUser>,
    credentials: HashMap<Uuid, Credentials>, // key: user_id
    // insertion order is the natural listing order
    articles: Vec<Article>,
    comments: Vec<Comment>,
}

/// Process-local store implementing every repository trait.
///
/// Mirrors the relational schema's rules: unique emails, comments only on
/// existing articles, and comments removed with their article.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self { Self::default() }
}

#[async_trait]
impl AuthRepository for InMemoryStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError> {
        let t = self.inner.read().await;
        Ok(t.users.values().find(|u| u.email == email.trim()).cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<AuthUser>, AuthError> {
        let t = self.inner.read().await;
        Ok(t.users.get(&id).cloned())
    }

    async fn create_account(&self, account: NewAccount) -> Result<AuthUser, AuthError> {
        models::user::validate_email(&account.email).map_err(invalid)?;
        models::user::validate_name(&account.name).map_err(invalid)?;
        if account.password_hash.trim().is_empty() {
            return Err(AuthError::Validation("password hash required".into()));
        }
        let mut t = self.inner.write().await;
        let email = account.email.trim();
        if t.users.values().any(|u| u.email == email) {
            return Err(AuthError::Conflict);
        }
        let user = AuthUser { id: Uuid::new_v4(), email: email.to_string(), name: account.name.trim().to_string() };
        let credentials = Credentials {
            user_id: user.id,
            password_hash: account.password_hash,
            password_algorithm: account.password_algorithm,
        };
        t.users.insert(user.id, user.clone());
        t.credentials.insert(user.id, credentials);
        Ok(user)
    }

    async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, AuthError> {
        let t = self.inner.read().await;
        Ok(t.credentials.get(&user_id).cloned())
    }
}

#[async_trait]
impl ArticleRepository for InMemoryStore {
    async fn insert(&self, user_id: Uuid, input: NewArticle) -> Result<Article, ServiceError> {
        models::article::validate_title(&input.title).map_err(ServiceError::from_model)?;
        let article = Article {
            id: Uuid::new_v4(),
            title: input.title,
            content: input.content,
            tags: input.tags,
            published_at: Utc::now(),
            user_id,
        };
        self.inner.write().await.articles.push(article.clone());
        Ok(article)
    }

    async fn list(&self) -> Result<Vec<Article>, ServiceError> {
        Ok(self.inner.read().await.articles.clone())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Article>, ServiceError> {
        let t = self.inner.read().await;
        Ok(t.articles.iter().find(|a| a.id == id).cloned())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        let mut t = self.inner.write().await;
        let before = t.articles.len();
        t.articles.retain(|a| a.id != id);
        let removed = t.articles.len() != before;
        if removed {
            t.comments.retain(|c| c.article_id != id);
        }
        Ok(removed)
    }
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn insert_for_article(&self, article_id: Uuid, user_id: Uuid, content: &str) -> Result<Option<Comment>, ServiceError> {
        // one write guard covers the check and the insert
        let mut t = self.inner.write().await;
        if !t.articles.iter().any(|a| a.id == article_id) {
            return Ok(None);
        }
        let comment = Comment {
            id: Uuid::new_v4(),
            content: content.to_string(),
            create_at: Utc::now(),
            user_id,
            article_id,
        };
        t.comments.push(comment.clone());
        Ok(Some(comment))
    }

    async fn list_by_article(&self, article_id: Uuid) -> Result<Vec<Comment>, ServiceError> {
        let t = self.inner.read().await;
        Ok(t.comments.iter().filter(|c| c.article_id == article_id).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(email: &str, hash: &str) -> NewAccount {
        NewAccount {
            email: email.into(),
            name: "A".into(),
            password_hash: hash.into(),
            password_algorithm: "argon2".into(),
        }
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let store = InMemoryStore::new();
        store.create_account(account("dup@example.com", "h")).await.unwrap();
        let err = store.create_account(account(" dup@example.com ", "h")).await.unwrap_err();
        assert!(matches!(err, AuthError::Conflict));
    }

    #[tokio::test]
    async fn rejected_account_stores_nothing() {
        let store = InMemoryStore::new();
        let err = store.create_account(account("blank@example.com", " ")).await.unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));
        assert!(store.find_user_by_email("blank@example.com").await.unwrap().is_none());

        let user = store.create_account(account("blank@example.com", "h")).await.unwrap();
        assert!(store.get_credentials(user.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn delete_reports_whether_anything_matched() {
        let store = InMemoryStore::new();
        let a = store
            .insert(Uuid::new_v4(), NewArticle { title: "T".into(), content: "C".into(), tags: vec![] })
            .await
            .unwrap();
        assert!(store.delete(a.id).await.unwrap());
        assert!(!store.delete(a.id).await.unwrap());
    }

    #[tokio::test]
    async fn clones_share_state() {
        let store = InMemoryStore::new();
        let other = store.clone();
        let u = store.create_account(account("shared@example.com", "h")).await.unwrap();
        assert_eq!(other.find_user_by_id(u.id).await.unwrap(), Some(u));
    }
}
