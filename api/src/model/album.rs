use kernel::model::{album::Album, id::AlbumId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumListQuery {
    pub place_type: String,
    pub place_id: Uuid,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumResponse {
    pub album_id: AlbumId,
    pub place_type: String,
    pub place_id: Uuid,
    pub file_name: String,
    pub url: String,
}

impl AlbumResponse {
    pub fn new(album: Album, url: String) -> Self {
        Self {
            album_id: album.album_id,
            place_type: album.place_type.as_ref().to_string(),
            place_id: album.place_id,
            file_name: album.file_name,
            url,
        }
    }
}
