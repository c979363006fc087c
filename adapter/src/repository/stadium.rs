use crate::database::{model::stadium::StadiumRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::{AccountId, StadiumId},
    stadium::{
        event::{CreateStadium, DeleteStadium, UpdateStadium},
        Stadium,
    },
};
use kernel::repository::stadium::StadiumRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct StadiumRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl StadiumRepository for StadiumRepositoryImpl {
    async fn create(&self, event: CreateStadium) -> AppResult<StadiumId> {
        let stadium_id = StadiumId::new();
        sqlx::query(
            r#"
                INSERT INTO stadiums (stadium_id, owned_by, name, description, address)
                VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(stadium_id)
        .bind(event.owned_by)
        .bind(&event.name)
        .bind(&event.description)
        .bind(&event.address)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;
        Ok(stadium_id)
    }

    async fn find_all(&self) -> AppResult<Vec<Stadium>> {
        let rows: Vec<StadiumRow> = sqlx::query_as(
            r#"
                SELECT
                    s.stadium_id,
                    s.name,
                    s.description,
                    s.address,
                    s.owned_by,
                    a.name AS owner_name
                FROM stadiums AS s
                INNER JOIN accounts AS a ON s.owned_by = a.account_id
                ORDER BY s.created_at DESC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;
        Ok(rows.into_iter().map(Stadium::from).collect())
    }

    async fn find_by_id(&self, stadium_id: StadiumId) -> AppResult<Option<Stadium>> {
        let row: Option<StadiumRow> = sqlx::query_as(
            r#"
                SELECT
                    s.stadium_id,
                    s.name,
                    s.description,
                    s.address,
                    s.owned_by,
                    a.name AS owner_name
                FROM stadiums AS s
                INNER JOIN accounts AS a ON s.owned_by = a.account_id
                WHERE s.stadium_id = $1
            "#,
        )
        .bind(stadium_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;
        Ok(row.map(Stadium::from))
    }

    async fn update(&self, event: UpdateStadium) -> AppResult<()> {
        self.check_owner(event.stadium_id, event.requested_user)
            .await?;

        let res = sqlx::query(
            r#"
                UPDATE stadiums
                SET
                    name = COALESCE($2, name),
                    description = COALESCE($3, description),
                    address = COALESCE($4, address)
                WHERE stadium_id = $1
            "#,
        )
        .bind(event.stadium_id)
        .bind(&event.name)
        .bind(&event.description)
        .bind(&event.address)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;
        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No stadium record has been updated".into(),
            ));
        }
        Ok(())
    }

    async fn delete(&self, event: DeleteStadium) -> AppResult<()> {
        self.check_owner(event.stadium_id, event.requested_user)
            .await?;

        sqlx::query(r#"DELETE FROM stadiums WHERE stadium_id = $1"#)
            .bind(event.stadium_id)
            .execute(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;
        Ok(())
    }
}

impl StadiumRepositoryImpl {
    // 更新系の操作はスタジアムのオーナーのみ行える
    async fn check_owner(
        &self,
        stadium_id: StadiumId,
        requested_user: AccountId,
    ) -> AppResult<()> {
        let row: Option<(AccountId,)> =
            sqlx::query_as(r#"SELECT owned_by FROM stadiums WHERE stadium_id = $1"#)
                .bind(stadium_id)
                .fetch_optional(self.db.inner_ref())
                .await
                .map_err(AppError::SpecificOperationError)?;
        let Some((owned_by,)) = row else {
            return Err(AppError::EntityNotFound(format!(
                "スタジアム（{stadium_id}）が見つかりませんでした"
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
