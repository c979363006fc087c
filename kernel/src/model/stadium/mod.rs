use crate::model::{account::StadiumOwner, id::StadiumId};
pub mod event;

#[derive(Debug)]
pub struct Stadium {
    pub stadium_id: StadiumId,
    pub name: String,
    pub description: String,
    pub address: String,
    pub owner: StadiumOwner,
}
