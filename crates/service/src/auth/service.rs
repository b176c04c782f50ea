use std::sync::Arc;

use argon2::{Argon2, password_hash::{PasswordHasher, PasswordVerifier, SaltString}, PasswordHash};
use models::errors::ModelError;
use rand::rngs::OsRng;
use tracing::{info, debug, instrument};

use super::domain::{RegisterInput, LoginInput, AuthUser, AuthSession, NewAccount};
use super::errors::AuthError;
use super::repository::AuthRepository;
use super::token::TokenKeys;

pub const MIN_PASSWORD_LEN: usize = 8;

fn invalid(e: ModelError) -> AuthError {
    match e {
        ModelError::Validation(msg) => AuthError::Validation(msg),
        other => AuthError::Storage(other.to_string()),
    }
}

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub password_algorithm: String,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>, token_ttl_hours: i64) -> Self {
        Self { jwt_secret: jwt_secret.into(), token_ttl_hours, password_algorithm: "argon2".into() }
    }
}

/// Auth business service independent of web framework
pub struct AuthService {
    repo: Arc<dyn AuthRepository>,
    cfg: AuthConfig,
    keys: TokenKeys,
}

impl AuthService {
    pub fn new(repo: Arc<dyn AuthRepository>, cfg: AuthConfig) -> Self {
        let keys = TokenKeys::new(&cfg.jwt_secret, cfg.token_ttl_hours);
        Self { repo, cfg, keys }
    }

    pub fn keys(&self) -> &TokenKeys { &self.keys }

    /// Register a new user with a hashed password.
    ///
    /// # Examples
    /// ```
    /// use service::auth::service::{AuthService, AuthConfig};
    /// use service::auth::domain::RegisterInput;
    /// use service::storage::memory::InMemoryStore;
    /// use std::sync::Arc;
    /// let store = Arc::new(InMemoryStore::default());
    /// let svc = AuthService::new(store, AuthConfig::new("secret", 1));
    /// let input = RegisterInput { email: "user@example.com".into(), name: "Test".into(), password: "Secret123".into() };
    /// let user = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(user.email, "user@example.com");
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: RegisterInput) -> Result<AuthUser, AuthError> {
        models::user::validate_email(&input.email).map_err(invalid)?;
        models::user::validate_name(&input.name).map_err(invalid)?;
        if input.password.len() < MIN_PASSWORD_LEN {
            return Err(AuthError::Validation(format!("password too short (>={MIN_PASSWORD_LEN})")));
        }
        if let Some(existing) = self.repo.find_user_by_email(input.email.trim()).await? {
            debug!("user exists: {}", existing.email);
            return Err(AuthError::Conflict);
        }

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(input.password.as_bytes(), &salt)
            .map_err(|e| AuthError::Hash(e.to_string()))?
            .to_string();

        let user = self
            .repo
            .create_account(NewAccount {
                email: input.email,
                name: input.name,
                password_hash,
                password_algorithm: self.cfg.password_algorithm.clone(),
            })
            .await?;
        info!(user_id = %user.id, email = %user.email, "user_registered");
        Ok(user)
    }

    /// Authenticate a user by password and issue a bearer token.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let user = self.repo
            .find_user_by_email(input.email.trim())
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let cred = self.repo
            .get_credentials(user.id)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let parsed = PasswordHash::new(&cred.password_hash).map_err(|e| AuthError::Hash(e.to_string()))?;
        if Argon2::default().verify_password(input.password.as_bytes(), &parsed).is_err() {
            return Err(AuthError::Unauthorized);
        }

        let token = self.keys.issue(&user)?;
        info!(user_id = %user.id, "user_logged_in");
        Ok(AuthSession { user, token })
    }

    /// Resolve a bearer token to a user that still exists.
    pub async fn authenticate(&self, token: &str) -> Result<AuthUser, AuthError> {
        let claims = self.keys.verify(token)?;
        let user_id = claims.user_id()?;
        self.repo
            .find_user_by_id(user_id)
            .await?
            .ok_or(AuthError::Unauthorized)
    }
}
