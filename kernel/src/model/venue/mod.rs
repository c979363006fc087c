use crate::model::id::{StadiumId, VenueId};
pub mod event;

#[derive(Debug, Clone)]
pub struct Venue {
    pub venue_id: VenueId,
    pub stadium_id: StadiumId,
    pub name: String,
    // false の場合はこのヴェニュー配下のコートを予約できない
    pub is_reservable: bool,
    // 何日先まで予約を受け付けるか
    pub reservation_interval: i32,
    pub court_count: i32,
    pub capacity: i32,
}
