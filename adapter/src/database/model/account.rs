use kernel::model::{account::Account, id::AccountId, role::Role};
use shared::error::AppError;
use std::str::FromStr;

#[derive(sqlx::FromRow)]
pub struct AccountRow {
    pub account_id: AccountId,
    pub name: String,
    pub email: String,
    pub role: String,
    pub google_refresh_token: Option<String>,
}

impl TryFrom<AccountRow> for Account {
    type Error = AppError;

    fn try_from(value: AccountRow) -> Result<Self, Self::Error> {
        let AccountRow {
            account_id,
            name,
            email,
            role,
            google_refresh_token,
        } = value;
        Ok(Account {
            account_id,
            name,
            email,
            role: Role::from_str(&role)
                .map_err(|e| AppError::ConversionEntityError(e.to_string()))?,
            is_google_linked: google_refresh_token.is_some(),
        })
    }
}
