use crate::model::{business_hour::PlaceType, id::AlbumId};
use uuid::Uuid;
pub mod event;

#[derive(Debug)]
pub struct Album {
    pub album_id: AlbumId,
    pub place_type: PlaceType,
    pub place_id: Uuid,
    pub file_name: String,
    // オブジェクトストレージ上のパス
    pub object_path: String,
}
