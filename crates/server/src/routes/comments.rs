use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use service::comments::domain::{Comment, NewComment};
use utoipa::ToSchema;

use crate::errors::{ApiError, ErrorBody};
use crate::extract::{CurrentUser, ValidJson};
use crate::state::ServerState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCommentRequest {
    pub article_id: String,
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CommentResponse {
    pub id: String,
    pub content: String,
    pub create_at: String,
    pub user_id: String,
    pub article_id: String,
}

impl From<Comment> for CommentResponse {
    fn from(c: Comment) -> Self {
        Self {
            id: c.id.to_string(),
            content: c.content,
            create_at: c.create_at.to_rfc3339(),
            user_id: c.user_id.to_string(),
            article_id: c.article_id.to_string(),
        }
    }
}

#[utoipa::path(post, path = "/comments/", tag = "comments", request_body = CreateCommentRequest,
    responses((status = 201, description = "Created", body = CommentResponse), (status = 401, description = "Unauthenticated", body = ErrorBody), (status = 404, description = "Not Found", body = ErrorBody), (status = 422, description = "Invalid input", body = ErrorBody)))]
pub async fn create(
    State(state): State<ServerState>,
    CurrentUser(user): CurrentUser,
    ValidJson(body): ValidJson<CreateCommentRequest>,
) -> Result<(StatusCode, Json<CommentResponse>), ApiError> {
    let input = NewComment { article_id: body.article_id, content: body.content };
    let comment = state.comments.create(user.id, input).await?;
    Ok((StatusCode::CREATED, Json(comment.into())))
}

#[utoipa::path(get, path = "/comments/article/{article_id}", tag = "comments",
    params(("article_id" = String, Path, description = "Article id")),
    responses((status = 200, description = "OK", body = [CommentResponse])))]
pub async fn list_by_article(
    State(state): State<ServerState>,
    Path(article_id): Path<String>,
) -> Result<Json<Vec<CommentResponse>>, ApiError> {
    let comments = state.comments.list_by_article(&article_id).await?;
    Ok(Json(comments.into_iter().map(CommentResponse::from).collect()))
}
