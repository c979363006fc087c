use crate::database::{model::album::AlbumRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    album::{
        event::{CreateAlbum, DeleteAlbum},
        Album,
    },
    business_hour::PlaceType,
    id::{AccountId, AlbumId},
};
use kernel::repository::album::AlbumRepository;
use shared::error::{AppError, AppResult};
use uuid::Uuid;

#[derive(new)]
pub struct AlbumRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl AlbumRepository for AlbumRepositoryImpl {
    async fn create(&self, event: CreateAlbum) -> AppResult<AlbumId> {
        let album_id = AlbumId::new();
        sqlx::query(
            r#"
                INSERT INTO albums
                (album_id, place_type, place_id, file_name, object_path, uploaded_by)
                VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(album_id)
        .bind(event.place_type.as_ref())
        .bind(event.place_id)
        .bind(&event.file_name)
        .bind(&event.object_path)
        .bind(event.uploaded_by)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;
        Ok(album_id)
    }

    async fn find_by_place(
        &self,
        place_type: PlaceType,
        place_id: Uuid,
    ) -> AppResult<Vec<Album>> {
        let rows: Vec<AlbumRow> = sqlx::query_as(
            r#"
                SELECT album_id, place_type, place_id, file_name, object_path
                FROM albums
                WHERE place_type = $1 AND place_id = $2
                ORDER BY created_at DESC
            "#,
        )
        .bind(place_type.as_ref())
        .bind(place_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;
        rows.into_iter().map(Album::try_from).collect()
    }

    async fn find_by_id(&self, album_id: AlbumId) -> AppResult<Option<Album>> {
        let row: Option<AlbumRow> = sqlx::query_as(
            r#"
                SELECT album_id, place_type, place_id, file_name, object_path
                FROM albums
                WHERE album_id = $1
            "#,
        )
        .bind(album_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;
        row.map(Album::try_from).transpose()
    }

    async fn delete(&self, event: DeleteAlbum) -> AppResult<()> {
        let row: Option<(AccountId,)> =
            sqlx::query_as(r#"SELECT uploaded_by FROM albums WHERE album_id = $1"#)
                .bind(event.album_id)
                .fetch_optional(self.db.inner_ref())
                .await
                .map_err(AppError::SpecificOperationError)?;
        let Some((uploaded_by,)) = row else {
            return Err(AppError::EntityNotFound(format!(
                "アルバム（{}）が見つかりませんでした",
                event.album_id
            )));
        };
        if uploaded_by != event.requested_user {
            return Err(AppError::NoPermission(
                "アップロードした本人のみ削除できます".into(),
            ));
        }

        sqlx::query(r#"DELETE FROM albums WHERE album_id = $1"#)
            .bind(event.album_id)
            .execute(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;
        Ok(())
    }
}
