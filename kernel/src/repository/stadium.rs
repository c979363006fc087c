use crate::model::{
    id::StadiumId,
    stadium::{
        event::{CreateStadium, DeleteStadium, UpdateStadium},
        Stadium,
    },
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait StadiumRepository: Send + Sync {
    async fn create(&self, event: CreateStadium) -> AppResult<StadiumId>;
    async fn find_all(&self) -> AppResult<Vec<Stadium>>;
    async fn find_by_id(&self, stadium_id: StadiumId) -> AppResult<Option<Stadium>>;
    async fn update(&self, event: UpdateStadium) -> AppResult<()>;
    async fn delete(&self, event: DeleteStadium) -> AppResult<()>;
}
