//! HS256 bearer tokens carrying the user id.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::domain::AuthUser;
use super::errors::AuthError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User email
    pub sub: String,
    /// User id
    pub uid: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn user_id(&self) -> Result<Uuid, AuthError> {
        Uuid::parse_str(&self.uid).map_err(|_| AuthError::Unauthorized)
    }
}

#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenKeys {
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::hours(ttl_hours),
        }
    }

    pub fn issue(&self, user: &AuthUser) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.email.clone(),
            uid: user.id.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::Token(e.to_string()))
    }

    /// Check signature and expiry. Every failure is `Unauthorized`.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => tracing::debug!("expired token"),
                    other => tracing::debug!(kind = ?other, "rejected token"),
                }
                AuthError::Unauthorized
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> AuthUser {
        AuthUser { id: Uuid::new_v4(), email: "u@example.com".into(), name: "U".into() }
    }

    #[test]
    fn issued_token_verifies() {
        let keys = TokenKeys::new("secret", 1);
        let u = user();
        let token = keys.issue(&u).unwrap();
        let claims = keys.verify(&token).unwrap();
        assert_eq!(claims.user_id().unwrap(), u.id);
        assert_eq!(claims.sub, u.email);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = TokenKeys::new("secret", 1).issue(&user()).unwrap();
        let err = TokenKeys::new("other", 1).verify(&token).unwrap_err();
        assert!(matches!(err, AuthError::Unauthorized));
    }

    #[test]
    fn expired_token_is_rejected() {
        let keys = TokenKeys::new("secret", -1);
        let token = keys.issue(&user()).unwrap();
        assert!(matches!(keys.verify(&token), Err(AuthError::Unauthorized)));
    }

    #[test]
    fn garbage_is_rejected() {
        let keys = TokenKeys::new("secret", 1);
        assert!(matches!(keys.verify("not.a.jwt"), Err(AuthError::Unauthorized)));
    }
}
