use garde::Validate;
use kernel::model::{account::Account, id::AccountId};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    #[garde(length(min = 1))]
    pub name: String,
    #[garde(email)]
    pub email: String,
    #[garde(length(min = 8))]
    pub password: String,
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordRequest {
    #[garde(length(min = 1))]
    pub current_password: String,
    #[garde(length(min = 8))]
    pub new_password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountIdResponse {
    pub account_id: AccountId,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub account_id: AccountId,
    pub name: String,
    pub email: String,
    pub role: String,
    pub is_google_linked: bool,
}

impl From<Account> for AccountResponse {
    fn from(value: Account) -> Self {
        let Account {
            account_id,
            name,
            email,
            role,
            is_google_linked,
        } = value;
        Self {
            account_id,
            name,
            email,
            role: role.as_ref().to_string(),
            is_google_linked,
        }
    }
}
