use chrono::NaiveTime;
use kernel::model::{
    business_hour::{BusinessHour, PlaceType},
    id::BusinessHourId,
};
use shared::error::AppError;
use std::str::FromStr;
use uuid::Uuid;

#[derive(sqlx::FromRow)]
pub struct BusinessHourRow {
    pub id: BusinessHourId,
    pub place_type: String,
    pub place_id: Uuid,
    pub weekday: i16,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl TryFrom<BusinessHourRow> for BusinessHour {
    type Error = AppError;

    fn try_from(value: BusinessHourRow) -> Result<Self, Self::Error> {
        let BusinessHourRow {
            id,
            place_type,
            place_id,
            weekday,
            start_time,
            end_time,
        } = value;
        Ok(BusinessHour {
            id,
            place_type: PlaceType::from_str(&place_type)
                .map_err(|e| AppError::ConversionEntityError(e.to_string()))?,
            place_id,
            weekday,
            start_time,
            end_time,
        })
    }
}
