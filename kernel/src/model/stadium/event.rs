use crate::model::id::{AccountId, StadiumId};
use derive_new::new;

#[derive(new)]
pub struct CreateStadium {
    pub name: String,
    pub description: String,
    pub address: String,
    pub owned_by: AccountId,
}

#[derive(Debug)]
pub struct UpdateStadium {
    pub stadium_id: StadiumId,
    pub name: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub requested_user: AccountId,
}

#[derive(Debug)]
pub struct DeleteStadium {
    pub stadium_id: StadiumId,
    pub requested_user: AccountId,
}
