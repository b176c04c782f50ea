use async_trait::async_trait;
use uuid::Uuid;

use super::domain::{AuthUser, Credentials, NewAccount};
use super::errors::AuthError;

/// Repository abstraction for auth-related persistence.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError>;
    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<AuthUser>, AuthError>;
    /// Store the user and its credentials together; neither exists if this fails.
    async fn create_account(&self, account: NewAccount) -> Result<AuthUser, AuthError>;
    async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, AuthError>;
}
