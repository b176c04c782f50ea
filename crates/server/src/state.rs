use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::{
    articles::{repo::seaorm::SeaOrmArticleRepository, ArticleService},
    auth::{repo::seaorm::SeaOrmAuthRepository, service::AuthConfig, AuthService},
    comments::{repo::seaorm::SeaOrmCommentRepository, CommentService},
    storage::memory::InMemoryStore,
};

/// Shared router state. Cheap to clone; every service sits behind an `Arc`.
#[derive(Clone)]
pub struct ServerState {
    pub auth: Arc<AuthService>,
    pub articles: Arc<ArticleService>,
    pub comments: Arc<CommentService>,
}

impl ServerState {
    pub fn with_database(db: DatabaseConnection, auth: AuthConfig) -> Self {
        Self {
            auth: Arc::new(AuthService::new(Arc::new(SeaOrmAuthRepository { db: db.clone() }), auth)),
            articles: Arc::new(ArticleService::new(Arc::new(SeaOrmArticleRepository { db: db.clone() }))),
            comments: Arc::new(CommentService::new(Arc::new(SeaOrmCommentRepository { db }))),
        }
    }

    /// All services share one process-local store.
    pub fn in_memory(auth: AuthConfig) -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self {
            auth: Arc::new(AuthService::new(store.clone(), auth)),
            articles: Arc::new(ArticleService::new(store.clone())),
            comments: Arc::new(CommentService::new(store)),
        }
    }
}
