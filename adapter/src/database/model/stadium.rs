use kernel::model::{
    account::StadiumOwner,
    id::{AccountId, StadiumId},
    stadium::Stadium,
};

#[derive(sqlx::FromRow)]
pub struct StadiumRow {
    pub stadium_id: StadiumId,
    pub name: String,
    pub description: String,
    pub address: String,
    pub owned_by: AccountId,
    pub owner_name: String,
}

impl From<StadiumRow> for Stadium {
    fn from(value: StadiumRow) -> Self {
        let StadiumRow {
            stadium_id,
            name,
            description,
            address,
            owned_by,
            owner_name,
        } = value;
        Stadium {
            stadium_id,
            name,
            description,
            address,
            owner: StadiumOwner {
                owner_id: owned_by,
                owner_name,
            },
        }
    }
}
