use sea_orm::{DatabaseConnection, EntityTrait, TransactionTrait};
use uuid::Uuid;

use crate::auth::domain::{AuthUser, Credentials, NewAccount};
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;
use models::errors::ModelError;

pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

fn storage(e: impl std::fmt::Display) -> AuthError {
    AuthError::Storage(e.to_string())
}

fn account_err(e: ModelError) -> AuthError {
    match e {
        ModelError::Validation(msg) => AuthError::Validation(msg),
        ModelError::Db(msg) if msg.contains("duplicate key") => AuthError::Conflict,
        other => storage(other),
    }
}

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError> {
        let res = models::user::find_by_email(&self.db, email).await.map_err(storage)?;
        Ok(res.map(AuthUser::from))
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<AuthUser>, AuthError> {
        let res = models::user::Entity::find_by_id(id).one(&self.db).await.map_err(storage)?;
        Ok(res.map(AuthUser::from))
    }

    async fn create_account(&self, account: NewAccount) -> Result<AuthUser, AuthError> {
        let txn = self.db.begin().await.map_err(storage)?;
        // dropping the transaction on an early return rolls it back
        let user = models::user::create(&txn, &account.email, &account.name)
            .await
            .map_err(account_err)?;
        models::user_credentials::upsert_password(&txn, user.id, account.password_hash, &account.password_algorithm)
            .await
            .map_err(account_err)?;
        txn.commit().await.map_err(storage)?;
        Ok(user.into())
    }

    async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, AuthError> {
        let res = models::user_credentials::find_by_user(&self.db, user_id).await.map_err(storage)?;
        Ok(res.map(Credentials::from))
    }
}
