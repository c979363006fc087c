use crate::{
    extractor::AuthorizedAccount,
    model::{
        account::{
            AccountIdResponse, AccountResponse, CreateAccountRequest, UpdatePasswordRequest,
        },
        Envelope,
    },
};
use axum::{extract::State, http::StatusCode, Json};
use garde::Validate;
use kernel::model::account::event::{CreateAccount, UpdateAccountPassword};
use registry::AppRegistry;
use shared::error::AppResult;

pub async fn register_account(
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateAccountRequest>,
) -> AppResult<(StatusCode, Json<Envelope<AccountIdResponse>>)> {
    req.validate(&())?;

    let account_id = registry
        .account_repository()
        .create(CreateAccount::new(req.name, req.email, req.password))
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(Envelope::new(AccountIdResponse { account_id })),
    ))
}

pub async fn show_me(account: AuthorizedAccount) -> Json<Envelope<AccountResponse>> {
    Json(Envelope::new(account.account.into()))
}

pub async fn change_password(
    account: AuthorizedAccount,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdatePasswordRequest>,
) -> AppResult<StatusCode> {
    req.validate(&())?;

    registry
        .account_repository()
        .update_password(UpdateAccountPassword::new(
            account.id(),
            req.current_password,
            req.new_password,
        ))
        .await
        .map(|_| StatusCode::OK)
}
