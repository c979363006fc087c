use crate::database::{model::business_hour::BusinessHourRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    business_hour::{event::ReplaceBusinessHours, BusinessHour, PlaceType},
    id::{AccountId, BusinessHourId},
};
use kernel::repository::business_hour::BusinessHourRepository;
use shared::error::{AppError, AppResult};
use uuid::Uuid;

#[derive(new)]
pub struct BusinessHourRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl BusinessHourRepository for BusinessHourRepositoryImpl {
    async fn find_by_place(
        &self,
        place_type: PlaceType,
        place_id: Uuid,
    ) -> AppResult<Vec<BusinessHour>> {
        let rows: Vec<BusinessHourRow> = sqlx::query_as(
            r#"
                SELECT id, place_type, place_id, weekday, start_time, end_time
                FROM business_hours
                WHERE place_type = $1 AND place_id = $2
                ORDER BY weekday ASC, start_time ASC
            "#,
        )
        .bind(place_type.as_ref())
        .bind(place_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;
        rows.into_iter().map(BusinessHour::try_from).collect()
    }

    async fn replace(&self, event: ReplaceBusinessHours) -> AppResult<()> {
        self.check_owner(event.place_type, event.place_id, event.requested_user)
            .await?;

        let mut tx = self.db.begin().await?;

        sqlx::query(r#"DELETE FROM business_hours WHERE place_type = $1 AND place_id = $2"#)
            .bind(event.place_type.as_ref())
            .bind(event.place_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        for hour in &event.hours {
            sqlx::query(
                r#"
                    INSERT INTO business_hours
                    (id, place_type, place_id, weekday, start_time, end_time)
                    VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(BusinessHourId::new())
            .bind(event.place_type.as_ref())
            .bind(event.place_id)
            .bind(hour.weekday)
            .bind(hour.start_time)
            .bind(hour.end_time)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        }

        tx.commit().await.map_err(AppError::TransactionError)?;
        Ok(())
    }
}

impl BusinessHourRepositoryImpl {
    // 営業時間を編集できるのは対象スタジアムのオーナーのみ
    async fn check_owner(
        &self,
        place_type: PlaceType,
        place_id: Uuid,
        requested_user: AccountId,
    ) -> AppResult<()> {
        let query = match place_type {
            PlaceType::Stadium => r#"SELECT owned_by FROM stadiums WHERE stadium_id = $1"#,
            PlaceType::Venue => {
                r#"
                    SELECT s.owned_by
                    FROM venues AS v
                    INNER JOIN stadiums AS s ON v.stadium_id = s.stadium_id
                    WHERE v.venue_id = $1
                "#
            }
        };
        let row: Option<(AccountId,)> = sqlx::query_as(query)
            .bind(place_id)
            .fetch_optional(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;
        let Some((owned_by,)) = row else {
            return Err(AppError::EntityNotFound(
                "営業時間の対象が見つかりませんでした".into(),
            ));
        };
        if owned_by != requested_user {
            return Err(AppError::NoPermission(
                "スタジアムのオーナーのみ営業時間を編集できます".into(),
            ));
        }
        Ok(())
    }
}
