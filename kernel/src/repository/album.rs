use crate::model::{
    album::{
        event::{CreateAlbum, DeleteAlbum},
        Album,
    },
    business_hour::PlaceType,
    id::AlbumId,
};
use async_trait::async_trait;
use shared::error::AppResult;
use uuid::Uuid;

#[async_trait]
pub trait AlbumRepository: Send + Sync {
    async fn create(&self, event: CreateAlbum) -> AppResult<AlbumId>;
    async fn find_by_place(&self, place_type: PlaceType, place_id: Uuid)
        -> AppResult<Vec<Album>>;
    async fn find_by_id(&self, album_id: AlbumId) -> AppResult<Option<Album>>;
    async fn delete(&self, event: DeleteAlbum) -> AppResult<()>;
}
