use kernel::model::{
    id::{StadiumId, VenueId},
    venue::Venue,
};

#[derive(sqlx::FromRow)]
pub struct VenueRow {
    pub venue_id: VenueId,
    pub stadium_id: StadiumId,
    pub name: String,
    pub is_reservable: bool,
    pub reservation_interval: i32,
    pub court_count: i32,
    pub capacity: i32,
}

impl From<VenueRow> for Venue {
    fn from(value: VenueRow) -> Self {
        let VenueRow {
            venue_id,
            stadium_id,
            name,
            is_reservable,
            reservation_interval,
            court_count,
            capacity,
        } = value;
        Venue {
            venue_id,
            stadium_id,
            name,
            is_reservable,
            reservation_interval,
            court_count,
            capacity,
        }
    }
}
