use crate::database::{model::venue::VenueRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::{AccountId, CourtId, StadiumId, VenueId},
    venue::{
        event::{CreateVenue, DeleteVenue, UpdateVenue},
        Venue,
    },
};
use kernel::repository::venue::VenueRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct VenueRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl VenueRepository for VenueRepositoryImpl {
    async fn create(&self, event: CreateVenue) -> AppResult<VenueId> {
        let mut tx = self.db.begin().await?;

        let owner: Option<(AccountId,)> =
            sqlx::query_as(r#"SELECT owned_by FROM stadiums WHERE stadium_id = $1"#)
                .bind(event.stadium_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?;
        let Some((owned_by,)) = owner else {
            return Err(AppError::EntityNotFound(format!(
                "スタジアム（{}）が見つかりませんでした",
                event.stadium_id
            )));
        };
        if owned_by != event.requested_user {
            return Err(AppError::NoPermission(
                "スタジアムのオーナーのみヴェニューを作成できます".into(),
            ));
        }

        let venue_id = VenueId::new();
        sqlx::query(
            r#"
                INSERT INTO venues
                (venue_id, stadium_id, name, is_reservable,
                reservation_interval, court_count, capacity)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(venue_id)
        .bind(event.stadium_id)
        .bind(&event.name)
        .bind(event.is_reservable)
        .bind(event.reservation_interval)
        .bind(event.court_count)
        .bind(event.capacity)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        // コートも面数分まとめて作成する
        for number in 1..=event.court_count {
            sqlx::query(
                r#"
                    INSERT INTO courts (court_id, venue_id, number)
                    VALUES ($1, $2, $3)
                "#,
            )
            .bind(CourtId::new())
            .bind(venue_id)
            .bind(number)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        }

        tx.commit().await.map_err(AppError::TransactionError)?;
        Ok(venue_id)
    }

    async fn find_by_id(&self, venue_id: VenueId) -> AppResult<Option<Venue>> {
        let row: Option<VenueRow> = sqlx::query_as(
            r#"
                SELECT
                    venue_id, stadium_id, name, is_reservable,
                    reservation_interval, court_count, capacity
                FROM venues
                WHERE venue_id = $1
            "#,
        )
        .bind(venue_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;
        Ok(row.map(Venue::from))
    }

    async fn find_by_stadium_id(&self, stadium_id: StadiumId) -> AppResult<Vec<Venue>> {
        let rows: Vec<VenueRow> = sqlx::query_as(
            r#"
                SELECT
                    venue_id, stadium_id, name, is_reservable,
                    reservation_interval, court_count, capacity
                FROM venues
                WHERE stadium_id = $1
                ORDER BY created_at ASC
            "#,
        )
        .bind(stadium_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;
        Ok(rows.into_iter().map(Venue::from).collect())
    }

    async fn update(&self, event: UpdateVenue) -> AppResult<()> {
        self.check_owner(event.venue_id, event.requested_user).await?;

        let res = sqlx::query(
            r#"
                UPDATE venues
                SET
                    name = COALESCE($2, name),
                    is_reservable = COALESCE($3, is_reservable),
                    reservation_interval = COALESCE($4, reservation_interval),
                    capacity = COALESCE($5, capacity)
                WHERE venue_id = $1
            "#,
        )
        .bind(event.venue_id)
        .bind(&event.name)
        .bind(event.is_reservable)
        .bind(event.reservation_interval)
        .bind(event.capacity)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;
        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No venue record has been updated".into(),
            ));
        }
        Ok(())
    }

    async fn delete(&self, event: DeleteVenue) -> AppResult<()> {
        self.check_owner(event.venue_id, event.requested_user).await?;

        sqlx::query(r#"DELETE FROM venues WHERE venue_id = $1"#)
            .bind(event.venue_id)
            .execute(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;
        Ok(())
    }
}

impl VenueRepositoryImpl {
    async fn check_owner(&self, venue_id: VenueId, requested_user: AccountId) -> AppResult<()> {
        let row: Option<(AccountId,)> = sqlx::query_as(
            r#"
                SELECT s.owned_by
                FROM venues AS v
                INNER JOIN stadiums AS s ON v.stadium_id = s.stadium_id
                WHERE v.venue_id = $1
            "#,
        )
        .bind(venue_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;
        let Some((owned_by,)) = row else {
            return Err(AppError::EntityNotFound(format!(
                "ヴェニュー（{venue_id}）が見つかりませんでした"
            )));
        };
        if owned_by != requested_user {
            return Err(AppError::NoPermission(
                "スタジアムのオーナーのみ操作できます".into(),
            ));
        }
        Ok(())
    }
}
