use crate::model::{
    auth::{event::CreateToken, AccessToken},
    id::AccountId,
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait AuthRepository: Send + Sync {
    // アクセストークンからアカウント ID を引く。期限切れ・未知のトークンは None
    async fn fetch_account_id_from_token(
        &self,
        access_token: &AccessToken,
    ) -> AppResult<Option<AccountId>>;
    // メールアドレスとパスワードを検証し、一致すればアカウント ID を返す
    async fn verify_password(&self, email: &str, password: &str) -> AppResult<AccountId>;
    async fn create_token(&self, event: CreateToken) -> AppResult<AccessToken>;
    async fn delete_token(&self, access_token: AccessToken) -> AppResult<()>;
}
