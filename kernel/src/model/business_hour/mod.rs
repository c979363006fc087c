use crate::model::id::BusinessHourId;
use chrono::NaiveTime;
use strum::{AsRefStr, EnumString};
use uuid::Uuid;
pub mod event;

// 営業時間はスタジアム単位・ヴェニュー単位のどちらにも紐づけられる
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum PlaceType {
    Stadium,
    Venue,
}

#[derive(Debug, Clone)]
pub struct BusinessHour {
    pub id: BusinessHourId,
    pub place_type: PlaceType,
    pub place_id: Uuid,
    // 月曜を 0 とする 0..=6
    pub weekday: i16,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}
