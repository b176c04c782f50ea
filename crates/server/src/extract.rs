//! Request extractors shared by the handlers.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Request},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use service::auth::{domain::AuthUser, errors::AuthError};
use tracing::debug;

use crate::errors::ApiError;
use crate::state::ServerState;

/// Cookie set on login; read when no `Authorization` header is sent.
pub const AUTH_COOKIE: &str = "auth_token";

/// The authenticated caller.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub AuthUser);

fn credential(headers: &HeaderMap) -> Result<String, ApiError> {
    if let Some(value) = headers.get(AUTHORIZATION) {
        let token = value
            .to_str()
            .ok()
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty());
        return token
            .map(str::to_string)
            .ok_or_else(|| ApiError::Unauthenticated("malformed Authorization header".into()));
    }
    CookieJar::from_headers(headers)
        .get(AUTH_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::Unauthenticated("missing credentials".into()))
}

#[async_trait]
impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &ServerState) -> Result<Self, Self::Rejection> {
        let token = credential(&parts.headers)?;
        match state.auth.authenticate(&token).await {
            Ok(user) => Ok(CurrentUser(user)),
            Err(AuthError::Unauthorized) => {
                debug!(path = %parts.uri.path(), "rejected credentials");
                Err(ApiError::Unauthenticated("invalid or expired token".into()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// `Json<T>` whose rejections (syntax, missing fields, content type) are 422.
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ValidJson(value)),
            Err(rejection) => Err(ApiError::InvalidInput(rejection.body_text())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn bearer_header_wins_over_cookie() {
        let mut h = HeaderMap::new();
        h.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        h.insert("cookie", HeaderValue::from_static("auth_token=xyz"));
        assert_eq!(credential(&h).unwrap(), "abc");
    }

    #[test]
    fn cookie_is_the_fallback() {
        let mut h = HeaderMap::new();
        h.insert("cookie", HeaderValue::from_static("theme=dark; auth_token=xyz"));
        assert_eq!(credential(&h).unwrap(), "xyz");
    }

    #[test]
    fn malformed_or_missing_is_unauthenticated() {
        let mut h = HeaderMap::new();
        assert!(matches!(credential(&h), Err(ApiError::Unauthenticated(_))));
        h.insert(AUTHORIZATION, HeaderValue::from_static("Token abc"));
        assert!(matches!(credential(&h), Err(ApiError::Unauthenticated(_))));
        h.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert!(matches!(credential(&h), Err(ApiError::Unauthenticated(_))));
    }
}
