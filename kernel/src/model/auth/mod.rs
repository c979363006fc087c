use crate::model::id::AccountId;
pub mod event;

// Redis に保存する不透明なアクセストークン
#[derive(Debug, Clone)]
pub struct AccessToken(pub String);

impl AccessToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug)]
pub struct AuthorizedAccountId(pub AccountId);
