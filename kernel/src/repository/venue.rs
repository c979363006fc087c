use crate::model::{
    id::{StadiumId, VenueId},
    venue::{
        event::{CreateVenue, DeleteVenue, UpdateVenue},
        Venue,
    },
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait VenueRepository: Send + Sync {
    // ヴェニューを作成し、court_count 面分のコートも同時に作成する
    async fn create(&self, event: CreateVenue) -> AppResult<VenueId>;
    async fn find_by_id(&self, venue_id: VenueId) -> AppResult<Option<Venue>>;
    async fn find_by_stadium_id(&self, stadium_id: StadiumId) -> AppResult<Vec<Venue>>;
    async fn update(&self, event: UpdateVenue) -> AppResult<()>;
    async fn delete(&self, event: DeleteVenue) -> AppResult<()>;
}
