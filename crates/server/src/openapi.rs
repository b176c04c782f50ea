use utoipa::OpenApi;
use utoipa::ToSchema;

use crate::errors::ErrorBody;
use crate::routes::{articles, auth, comments};

#[derive(ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        articles::create,
        articles::list,
        articles::get,
        articles::delete,
        comments::create,
        comments::list_by_article,
        auth::register,
        auth::login,
        auth::logout,
        auth::me,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorBody,
            articles::CreateArticleRequest,
            articles::ArticleResponse,
            comments::CreateCommentRequest,
            comments::CommentResponse,
            auth::RegisterRequest,
            auth::LoginRequest,
            auth::RegisterResponse,
            auth::LoginResponse,
            auth::MeResponse,
        )
    ),
    tags(
        (name = "health"),
        (name = "articles"),
        (name = "comments"),
        (name = "auth")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_route() {
        let doc = ApiDoc::openapi();
        for path in ["/health", "/articles/", "/articles/{id}", "/comments/", "/comments/article/{article_id}", "/auth/login"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
