use crate::model::{
    account::{
        event::{CreateAccount, UpdateAccountPassword, UpsertGoogleAccount},
        Account,
    },
    id::AccountId,
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn create(&self, event: CreateAccount) -> AppResult<AccountId>;
    async fn find_by_id(&self, account_id: AccountId) -> AppResult<Option<Account>>;
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>>;
    async fn update_password(&self, event: UpdateAccountPassword) -> AppResult<()>;
    // Google ログイン時にアカウントを作成または更新し、リフレッシュトークンを紐づける
    async fn upsert_google_account(&self, event: UpsertGoogleAccount) -> AppResult<AccountId>;
    // 連携済みアカウントのリフレッシュトークン。未連携なら None
    async fn google_refresh_token(&self, account_id: AccountId) -> AppResult<Option<String>>;
    // 招待メールの宛先用にメールアドレスをまとめて引く
    async fn emails_of(&self, account_ids: &[AccountId]) -> AppResult<Vec<String>>;
}
