use crate::{database::ConnectionPool, redis::RedisClient};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    auth::{event::CreateToken, AccessToken},
    id::AccountId,
};
use kernel::repository::auth::AuthRepository;
use shared::error::{AppError, AppResult};
use std::{str::FromStr, sync::Arc};

#[derive(new)]
pub struct AuthRepositoryImpl {
    db: ConnectionPool,
    kv: Arc<RedisClient>,
    ttl: u64,
}

#[async_trait]
impl AuthRepository for AuthRepositoryImpl {
    async fn fetch_account_id_from_token(
        &self,
        access_token: &AccessToken,
    ) -> AppResult<Option<AccountId>> {
        let value = self.kv.get(access_token.as_str()).await?;
        value
            .map(|v| {
                AccountId::from_str(&v).map_err(|e| AppError::ConversionEntityError(e.to_string()))
            })
            .transpose()
    }

    async fn verify_password(&self, email: &str, password: &str) -> AppResult<AccountId> {
        let row: Option<(AccountId, String)> = sqlx::query_as(
            r#"
                SELECT account_id, password_hash
                FROM accounts
                WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        let Some((account_id, password_hash)) = row else {
            return Err(AppError::LoginFailed);
        };
        let valid = bcrypt::verify(password, &password_hash).map_err(|_| AppError::LoginFailed)?;
        if !valid {
            return Err(AppError::LoginFailed);
        }
        Ok(account_id)
    }

    async fn create_token(&self, event: CreateToken) -> AppResult<AccessToken> {
        let token = AccessToken(uuid::Uuid::new_v4().simple().to_string());
        self.kv
            .set_ex(token.as_str(), &event.account_id.to_string(), self.ttl)
            .await?;
        Ok(token)
    }

    async fn delete_token(&self, access_token: AccessToken) -> AppResult<()> {
        self.kv.delete(access_token.as_str()).await
    }
}
