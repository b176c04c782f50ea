use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use service::articles::domain::{Article, NewArticle};
use utoipa::ToSchema;

use crate::errors::{ApiError, ErrorBody};
use crate::extract::{CurrentUser, ValidJson};
use crate::state::ServerState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateArticleRequest {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ArticleResponse {
    pub id: String,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    /// RFC 3339
    pub published_at: String,
    pub user_id: String,
}

impl From<Article> for ArticleResponse {
    fn from(a: Article) -> Self {
        Self {
            id: a.id.to_string(),
            title: a.title,
            content: a.content,
            tags: a.tags,
            published_at: a.published_at.to_rfc3339(),
            user_id: a.user_id.to_string(),
        }
    }
}

#[utoipa::path(post, path = "/articles/", tag = "articles", request_body = CreateArticleRequest,
    responses((status = 201, description = "Created", body = ArticleResponse), (status = 401, description = "Unauthenticated", body = ErrorBody), (status = 422, description = "Invalid input", body = ErrorBody)))]
pub async fn create(
    State(state): State<ServerState>,
    CurrentUser(user): CurrentUser,
    ValidJson(body): ValidJson<CreateArticleRequest>,
) -> Result<(StatusCode, Json<ArticleResponse>), ApiError> {
    let input = NewArticle { title: body.title, content: body.content, tags: body.tags };
    let article = state.articles.create(user.id, input).await?;
    Ok((StatusCode::CREATED, Json(article.into())))
}

#[utoipa::path(get, path = "/articles/", tag = "articles", responses((status = 200, description = "OK", body = [ArticleResponse])))]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<ArticleResponse>>, ApiError> {
    let articles = state.articles.list().await?;
    Ok(Json(articles.into_iter().map(ArticleResponse::from).collect()))
}

#[utoipa::path(get, path = "/articles/{id}", tag = "articles", params(("id" = String, Path, description = "Article id")),
    responses((status = 200, description = "OK", body = ArticleResponse), (status = 404, description = "Not Found", body = ErrorBody)))]
pub async fn get(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<ArticleResponse>, ApiError> {
    let article = state.articles.get(&id).await?;
    Ok(Json(article.into()))
}

#[utoipa::path(delete, path = "/articles/{id}", tag = "articles", params(("id" = String, Path, description = "Article id")),
    responses((status = 204, description = "No Content"), (status = 401, description = "Unauthenticated", body = ErrorBody), (status = 403, description = "Forbidden", body = ErrorBody)))]
pub async fn delete(
    State(state): State<ServerState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.articles.delete(user.id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
