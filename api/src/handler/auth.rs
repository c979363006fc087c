use crate::{
    extractor::AuthorizedAccount,
    model::{
        auth::{AccessTokenResponse, GoogleAuthUrlResponse, GoogleCallbackRequest, LoginRequest},
        Envelope,
    },
};
use axum::{extract::State, http::StatusCode, Json};
use garde::Validate;
use kernel::model::{account::event::UpsertGoogleAccount, auth::event::CreateToken};
use registry::AppRegistry;
use shared::error::AppResult;

pub async fn login(
    State(registry): State<AppRegistry>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<Envelope<AccessTokenResponse>>> {
    req.validate(&())?;

    let account_id = registry
        .auth_repository()
        .verify_password(&req.email, &req.password)
        .await?;
    let access_token = registry
        .auth_repository()
        .create_token(CreateToken::new(account_id))
        .await?;
    Ok(Json(Envelope::new(access_token.into())))
}

pub async fn logout(
    account: AuthorizedAccount,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .auth_repository()
        .delete_token(account.access_token)
        .await
        .map(|_| StatusCode::NO_CONTENT)
}

// ユーザーをリダイレクトさせる Google の認可 URL を返す
pub async fn google_auth_url(
    State(registry): State<AppRegistry>,
) -> Json<Envelope<GoogleAuthUrlResponse>> {
    let url = registry.google_client().auth_url();
    Json(Envelope::new(GoogleAuthUrlResponse { url }))
}

// 認可コードをトークンに交換し、プロフィールでアカウントを
// 作成または更新してからアクセストークンを発行する
pub async fn google_callback(
    State(registry): State<AppRegistry>,
    Json(req): Json<GoogleCallbackRequest>,
) -> AppResult<Json<Envelope<AccessTokenResponse>>> {
    let tokens = registry.google_client().exchange_code(&req.code).await?;
    let profile = registry
        .google_client()
        .fetch_profile(&tokens.access_token)
        .await?;

    let account_id = registry
        .account_repository()
        .upsert_google_account(UpsertGoogleAccount::new(
            profile.name,
            profile.email,
            tokens.refresh_token,
        ))
        .await?;
    let access_token = registry
        .auth_repository()
        .create_token(CreateToken::new(account_id))
        .await?;
    Ok(Json(Envelope::new(access_token.into())))
}
