use kernel::model::{
    court::Court,
    id::{CourtId, VenueId},
};

#[derive(sqlx::FromRow)]
pub struct CourtRow {
    pub court_id: CourtId,
    pub venue_id: VenueId,
    pub number: i32,
    pub is_published: bool,
}

impl From<CourtRow> for Court {
    fn from(value: CourtRow) -> Self {
        let CourtRow {
            court_id,
            venue_id,
            number,
            is_published,
        } = value;
        Court {
            court_id,
            venue_id,
            number,
            is_published,
        }
    }
}
