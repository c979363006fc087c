use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    typed_header::TypedHeader,
};
use kernel::model::{account::Account, auth::AccessToken, id::AccountId};
use registry::AppRegistry;
use shared::error::AppError;

// Bearer トークンからアカウントを引くエクストラクター。
// トークンが Redis に存在しなければ期限切れとして扱う
pub struct AuthorizedAccount {
    pub access_token: AccessToken,
    pub account: Account,
}

impl AuthorizedAccount {
    pub fn id(&self) -> AccountId {
        self.account.account_id
    }

    pub fn email(&self) -> &str {
        &self.account.email
    }
}

#[axum::async_trait]
impl FromRequestParts<AppRegistry> for AuthorizedAccount {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        registry: &AppRegistry,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, registry)
                .await
                .map_err(|_| AppError::Unauthenticated)?;
        let access_token = AccessToken(bearer.token().to_string());

        let account_id = registry
            .auth_repository()
            .fetch_account_id_from_token(&access_token)
            .await?
            .ok_or(AppError::LoginExpired)?;
        let account = registry
            .account_repository()
            .find_by_id(account_id)
            .await?
            .ok_or(AppError::Unauthenticated)?;

        Ok(Self {
            access_token,
            account,
        })
    }
}
