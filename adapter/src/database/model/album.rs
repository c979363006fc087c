use kernel::model::{
    album::Album,
    business_hour::PlaceType,
    id::AlbumId,
};
use shared::error::AppError;
use std::str::FromStr;
use uuid::Uuid;

#[derive(sqlx::FromRow)]
pub struct AlbumRow {
    pub album_id: AlbumId,
    pub place_type: String,
    pub place_id: Uuid,
    pub file_name: String,
    pub object_path: String,
}

impl TryFrom<AlbumRow> for Album {
    type Error = AppError;

    fn try_from(value: AlbumRow) -> Result<Self, Self::Error> {
        let AlbumRow {
            album_id,
            place_type,
            place_id,
            file_name,
            object_path,
        } = value;
        Ok(Album {
            album_id,
            place_type: PlaceType::from_str(&place_type)
                .map_err(|e| AppError::ConversionEntityError(e.to_string()))?,
            place_id,
            file_name,
            object_path,
        })
    }
}
