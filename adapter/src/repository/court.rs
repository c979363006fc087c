use crate::database::{model::court::CourtRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    court::{
        event::{CreateCourt, UpdateCourtPublished},
        Court,
    },
    id::{AccountId, CourtId, VenueId},
};
use kernel::repository::court::CourtRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct CourtRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl CourtRepository for CourtRepositoryImpl {
    async fn create(&self, event: CreateCourt) -> AppResult<CourtId> {
        self.check_owner_of_venue(event.venue_id, event.requested_user)
            .await?;

        let court_id = CourtId::new();
        sqlx::query(
            r#"
                INSERT INTO courts (court_id, venue_id, number)
                VALUES ($1, $2, $3)
            "#,
        )
        .bind(court_id)
        .bind(event.venue_id)
        .bind(event.number)
        .execute(self.db.inner_ref())
        .await
        .map_err(|e| match e.as_database_error() {
            Some(de) if de.is_unique_violation() => {
                AppError::UniqueViolation("同じ番号のコートがすでに存在します".into())
            }
            _ => AppError::SpecificOperationError(e),
        })?;
        Ok(court_id)
    }

    async fn find_by_id(&self, court_id: CourtId) -> AppResult<Option<Court>> {
        let row: Option<CourtRow> = sqlx::query_as(
            r#"
                SELECT court_id, venue_id, number, is_published
                FROM courts
                WHERE court_id = $1
            "#,
        )
        .bind(court_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;
        Ok(row.map(Court::from))
    }

    async fn find_by_venue_id(&self, venue_id: VenueId) -> AppResult<Vec<Court>> {
        let rows: Vec<CourtRow> = sqlx::query_as(
            r#"
                SELECT court_id, venue_id, number, is_published
                FROM courts
                WHERE venue_id = $1
                ORDER BY number ASC
            "#,
        )
        .bind(venue_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;
        Ok(rows.into_iter().map(Court::from).collect())
    }

    async fn set_published(&self, event: UpdateCourtPublished) -> AppResult<()> {
        let row: Option<(AccountId,)> = sqlx::query_as(
            r#"
                SELECT s.owned_by
                FROM courts AS c
                INNER JOIN venues AS v ON c.venue_id = v.venue_id
                INNER JOIN stadiums AS s ON v.stadium_id = s.stadium_id
                WHERE c.court_id = $1
            "#,
        )
        .bind(event.court_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;
        let Some((owned_by,)) = row else {
            return Err(AppError::EntityNotFound(format!(
                "コート（{}）が見つかりませんでした",
                event.court_id
            )));
        };
        if owned_by != event.requested_user {
            return Err(AppError::NoPermission(
                "スタジアムのオーナーのみ公開状態を変更できます".into(),
            ));
        }

        let res = sqlx::query(r#"UPDATE courts SET is_published = $2 WHERE court_id = $1"#)
            .bind(event.court_id)
            .bind(event.is_published)
            .execute(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;
        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No court record has been updated".into(),
            ));
        }
        Ok(())
    }
}

impl CourtRepositoryImpl {
    async fn check_owner_of_venue(
        &self,
        venue_id: VenueId,
        requested_user: AccountId,
    ) -> AppResult<()> {
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
                "スタジアムのオーナーのみコートを追加できます".into(),
            ));
        }
        Ok(())
    }
}
