use crate::model::{
    court::{
        event::{CreateCourt, UpdateCourtPublished},
        Court,
    },
    id::{CourtId, VenueId},
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait CourtRepository: Send + Sync {
    async fn create(&self, event: CreateCourt) -> AppResult<CourtId>;
    async fn find_by_id(&self, court_id: CourtId) -> AppResult<Option<Court>>;
    async fn find_by_venue_id(&self, venue_id: VenueId) -> AppResult<Vec<Court>>;
    // 公開フラグの更新。ヴェニューの属するスタジアムのオーナーのみ可
    async fn set_published(&self, event: UpdateCourtPublished) -> AppResult<()>;
}
