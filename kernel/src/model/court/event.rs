use crate::model::id::{AccountId, CourtId, VenueId};
use derive_new::new;

#[derive(new)]
pub struct CreateCourt {
    pub venue_id: VenueId,
    pub number: i32,
    pub requested_user: AccountId,
}

#[derive(new)]
pub struct UpdateCourtPublished {
    pub court_id: CourtId,
    pub is_published: bool,
    pub requested_user: AccountId,
}
