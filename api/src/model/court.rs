use garde::Validate;
use kernel::model::{
    court::Court,
    id::{CourtId, VenueId},
};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourtRequest {
    #[garde(range(min = 1))]
    pub number: i32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourtPublishedRequest {
    pub is_published: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourtIdResponse {
    pub court_id: CourtId,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourtResponse {
    pub court_id: CourtId,
    pub venue_id: VenueId,
    pub number: i32,
    pub is_published: bool,
}

impl From<Court> for CourtResponse {
    fn from(value: Court) -> Self {
        let Court {
            court_id,
            venue_id,
            number,
            is_published,
        } = value;
        Self {
            court_id,
            venue_id,
            number,
            is_published,
        }
    }
}
