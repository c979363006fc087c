use crate::{
    extractor::AuthorizedAccount,
    model::{
        stadium::{
            CreateStadiumRequest, StadiumIdResponse, StadiumResponse, UpdateStadiumRequest,
        },
        Envelope,
    },
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::{
    id::StadiumId,
    stadium::event::{CreateStadium, DeleteStadium, UpdateStadium},
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn register_stadium(
    account: AuthorizedAccount,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateStadiumRequest>,
) -> AppResult<(StatusCode, Json<Envelope<StadiumIdResponse>>)> {
    req.validate(&())?;

    let stadium_id = registry
        .stadium_repository()
        .create(CreateStadium::new(
            req.name,
            req.description,
            req.address,
            account.id(),
        ))
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(Envelope::new(StadiumIdResponse { stadium_id })),
    ))
}

pub async fn show_stadium_list(
    _account: AuthorizedAccount,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Envelope<Vec<StadiumResponse>>>> {
    let stadiums = registry.stadium_repository().find_all().await?;
    Ok(Json(Envelope::new(
        stadiums.into_iter().map(StadiumResponse::from).collect(),
    )))
}

pub async fn show_stadium(
    _account: AuthorizedAccount,
    Path(stadium_id): Path<StadiumId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Envelope<StadiumResponse>>> {
    registry
        .stadium_repository()
        .find_by_id(stadium_id)
        .await
        .and_then(|stadium| match stadium {
            Some(stadium) => Ok(Json(Envelope::new(stadium.into()))),
            None => Err(AppError::EntityNotFound(
                "スタジアムが見つかりませんでした".into(),
            )),
        })
}

pub async fn update_stadium(
    account: AuthorizedAccount,
    Path(stadium_id): Path<StadiumId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateStadiumRequest>,
) -> AppResult<StatusCode> {
    req.validate(&())?;

    registry
        .stadium_repository()
        .update(UpdateStadium {
            stadium_id,
            name: req.name,
            description: req.description,
            address: req.address,
            requested_user: account.id(),
        })
        .await
        .map(|_| StatusCode::OK)
}

pub async fn delete_stadium(
    account: AuthorizedAccount,
    Path(stadium_id): Path<StadiumId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .stadium_repository()
        .delete(DeleteStadium {
            stadium_id,
            requested_user: account.id(),
        })
        .await
        .map(|_| StatusCode::OK)
}
