use crate::model::{id::AccountId, role::Role};
pub mod event;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub account_id: AccountId,
    pub name: String,
    pub email: String,
    pub role: Role,
    // Google アカウント連携済みかどうか（リフレッシュトークンの有無）
    pub is_google_linked: bool,
}

#[derive(Debug)]
pub struct StadiumOwner {
    pub owner_id: AccountId,
    pub owner_name: String,
}
