use garde::Validate;
use kernel::model::{
    id::{StadiumId, VenueId},
    venue::Venue,
};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVenueRequest {
    #[garde(length(min = 1))]
    pub name: String,
    #[garde(skip)]
    #[serde(default = "default_reservable")]
    pub is_reservable: bool,
    // 何日先まで予約を受け付けるか
    #[garde(range(min = 1))]
    #[serde(default = "default_interval")]
    pub reservation_interval: i32,
    #[garde(range(min = 1))]
    pub court_count: i32,
    #[garde(range(min = 0))]
    #[serde(default)]
    pub capacity: i32,
}

fn default_reservable() -> bool {
    true
}

fn default_interval() -> i32 {
    14
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVenueRequest {
    #[garde(inner(length(min = 1)))]
    pub name: Option<String>,
    #[garde(skip)]
    pub is_reservable: Option<bool>,
    #[garde(inner(range(min = 1)))]
    pub reservation_interval: Option<i32>,
    #[garde(inner(range(min = 0)))]
    pub capacity: Option<i32>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueIdResponse {
    pub venue_id: VenueId,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueResponse {
    pub venue_id: VenueId,
    pub stadium_id: StadiumId,
    pub name: String,
    pub is_reservable: bool,
    pub reservation_interval: i32,
    pub court_count: i32,
    pub capacity: i32,
}

impl From<Venue> for VenueResponse {
    fn from(value: Venue) -> Self {
        let Venue {
            venue_id,
            stadium_id,
            name,
            is_reservable,
            reservation_interval,
            court_count,
            capacity,
        } = value;
        Self {
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
