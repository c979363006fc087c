use chrono::NaiveTime;
use garde::Validate;
use kernel::model::{business_hour::BusinessHour, range::WeekTimeRange};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessHourPlaceQuery {
    pub place_type: String,
    pub place_id: Uuid,
}

// 月曜を 0 とする weekday と時刻帯のペア
#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BusinessHourSlot {
    #[garde(range(min = 0, max = 6))]
    pub weekday: i16,
    #[garde(skip)]
    pub start_time: NaiveTime,
    #[garde(skip)]
    pub end_time: NaiveTime,
}

impl From<&BusinessHourSlot> for WeekTimeRange {
    fn from(value: &BusinessHourSlot) -> Self {
        WeekTimeRange::new(value.weekday, value.start_time, value.end_time)
    }
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceBusinessHoursRequest {
    #[garde(dive)]
    pub hours: Vec<BusinessHourSlot>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessHourResponse {
    pub weekday: i16,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl From<BusinessHour> for BusinessHourResponse {
    fn from(value: BusinessHour) -> Self {
        Self {
            weekday: value.weekday,
            start_time: value.start_time,
            end_time: value.end_time,
        }
    }
}
