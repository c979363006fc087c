use crate::model::id::AccountId;
use derive_new::new;

#[derive(new)]
pub struct CreateAccount {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(new)]
pub struct UpdateAccountPassword {
    pub account_id: AccountId,
    pub current_password: String,
    pub new_password: String,
}

// Google ログインで取得したプロフィールからアカウントを作成または更新する
#[derive(new)]
pub struct UpsertGoogleAccount {
    pub name: String,
    pub email: String,
    pub refresh_token: Option<String>,
}
