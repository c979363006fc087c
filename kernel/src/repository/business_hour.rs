use crate::model::business_hour::{event::ReplaceBusinessHours, BusinessHour, PlaceType};
use async_trait::async_trait;
use shared::error::AppResult;
use uuid::Uuid;

#[async_trait]
pub trait BusinessHourRepository: Send + Sync {
    async fn find_by_place(
        &self,
        place_type: PlaceType,
        place_id: Uuid,
    ) -> AppResult<Vec<BusinessHour>>;
    // 1 週間分をまとめて入れ替える
    async fn replace(&self, event: ReplaceBusinessHours) -> AppResult<()>;
}
