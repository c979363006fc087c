use crate::model::{business_hour::PlaceType, id::{AccountId, AlbumId}};
use derive_new::new;
use uuid::Uuid;

#[derive(new)]
pub struct CreateAlbum {
    pub place_type: PlaceType,
    pub place_id: Uuid,
    pub file_name: String,
    pub object_path: String,
    pub uploaded_by: AccountId,
}

#[derive(new)]
pub struct DeleteAlbum {
    pub album_id: AlbumId,
    pub requested_user: AccountId,
}
