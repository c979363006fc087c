use crate::model::id::{CourtId, VenueId};
pub mod event;

#[derive(Debug, Clone)]
pub struct Court {
    pub court_id: CourtId,
    pub venue_id: VenueId,
    pub number: i32,
    pub is_published: bool,
}
