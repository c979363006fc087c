use crate::model::id::AccountId;
use derive_new::new;

#[derive(new)]
pub struct CreateToken {
    pub account_id: AccountId,
}
