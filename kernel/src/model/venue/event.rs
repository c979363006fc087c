use crate::model::id::{AccountId, StadiumId, VenueId};
use derive_new::new;

#[derive(new)]
pub struct CreateVenue {
    pub stadium_id: StadiumId,
    pub name: String,
    pub is_reservable: bool,
    pub reservation_interval: i32,
    pub court_count: i32,
    pub capacity: i32,
    pub requested_user: AccountId,
}

#[derive(Debug)]
pub struct UpdateVenue {
    pub venue_id: VenueId,
    pub name: Option<String>,
    pub is_reservable: Option<bool>,
    pub reservation_interval: Option<i32>,
    pub capacity: Option<i32>,
    pub requested_user: AccountId,
}

#[derive(Debug)]
pub struct DeleteVenue {
    pub venue_id: VenueId,
    pub requested_user: AccountId,
}
