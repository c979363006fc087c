use crate::model::{business_hour::PlaceType, id::AccountId, range::WeekTimeRange};
use derive_new::new;
use uuid::Uuid;

// 営業時間テーブルは 1 週間分をまとめて洗い替えする
#[derive(new)]
pub struct ReplaceBusinessHours {
    pub place_type: PlaceType,
    pub place_id: Uuid,
    pub hours: Vec<WeekTimeRange>,
    pub requested_user: AccountId,
}
