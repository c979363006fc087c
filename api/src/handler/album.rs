use crate::{
    extractor::AuthorizedAccount,
    model::{
        album::{AlbumListQuery, AlbumResponse},
        Envelope,
    },
};
use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use kernel::model::{
    album::event::{CreateAlbum, DeleteAlbum},
    business_hour::PlaceType,
    id::AlbumId,
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};
use std::str::FromStr;
use uuid::Uuid;

struct UploadForm {
    place_type: PlaceType,
    place_id: Uuid,
    file_name: String,
    content_type: String,
    bytes: Vec<u8>,
}

async fn read_upload_form(mut multipart: Multipart) -> AppResult<UploadForm> {
    let mut place_type = None;
    let mut place_id = None;
    let mut file = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::IllegalInput(format!("マルチパートを読み取れません: {e}")))?
    {
        match field.name() {
            Some("placeType") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::IllegalInput(e.to_string()))?;
                place_type = Some(
                    PlaceType::from_str(&value)
                        .map_err(|_| AppError::IllegalInput("不正な場所の種別です".into()))?,
                );
            }
            Some("placeId") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::IllegalInput(e.to_string()))?;
                place_id = Some(
                    Uuid::from_str(&value)
                        .map_err(|_| AppError::IllegalInput("不正な場所 ID です".into()))?,
                );
            }
            Some("file") => {
                let file_name = field.file_name().unwrap_or("untitled").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::IllegalInput(e.to_string()))?;
                file = Some((file_name, content_type, bytes.to_vec()));
            }
            _ => {}
        }
    }

    match (place_type, place_id, file) {
        (Some(place_type), Some(place_id), Some((file_name, content_type, bytes))) => {
            Ok(UploadForm {
                place_type,
                place_id,
                file_name,
                content_type,
                bytes,
            })
        }
        _ => Err(AppError::IllegalInput(
            "placeType・placeId・file はすべて必須です".into(),
        )),
    }
}

pub async fn upload_album(
    account: AuthorizedAccount,
    State(registry): State<AppRegistry>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<Envelope<AlbumResponse>>)> {
    let form = read_upload_form(multipart).await?;

    // オブジェクト名は UUID ベースにして衝突とパスエンコードを避ける
    let object_path = format!("{}/{}", form.place_type.as_ref(), Uuid::new_v4());
    registry
        .storage_client()
        .upload(&object_path, &form.content_type, form.bytes)
        .await?;

    let album_id = registry
        .album_repository()
        .create(CreateAlbum::new(
            form.place_type,
            form.place_id,
            form.file_name,
            object_path.clone(),
            account.id(),
        ))
        .await?;
    let album = registry
        .album_repository()
        .find_by_id(album_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound("アルバムが見つかりませんでした".into()))?;

    let url = registry.storage_client().public_url(&object_path);
    Ok((
        StatusCode::CREATED,
        Json(Envelope::new(AlbumResponse::new(album, url))),
    ))
}

pub async fn show_album_list(
    _account: AuthorizedAccount,
    Query(query): Query<AlbumListQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Envelope<Vec<AlbumResponse>>>> {
    let place_type = PlaceType::from_str(&query.place_type)
        .map_err(|_| AppError::IllegalInput("不正な場所の種別です".into()))?;
    let albums = registry
        .album_repository()
        .find_by_place(place_type, query.place_id)
        .await?;
    let responses = albums
        .into_iter()
        .map(|album| {
            let url = registry.storage_client().public_url(&album.object_path);
            AlbumResponse::new(album, url)
        })
        .collect();
    Ok(Json(Envelope::new(responses)))
}

pub async fn delete_album(
    account: AuthorizedAccount,
    Path(album_id): Path<AlbumId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    let album = registry
        .album_repository()
        .find_by_id(album_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound("アルバムが見つかりませんでした".into()))?;

    registry
        .album_repository()
        .delete(DeleteAlbum::new(album_id, account.id()))
        .await?;

    // ストレージ側の削除はベストエフォート
    if let Err(e) = registry.storage_client().delete(&album.object_path).await {
        tracing::warn!(error.message = %e, "ストレージのオブジェクト削除に失敗しました");
    }
    Ok(StatusCode::OK)
}
