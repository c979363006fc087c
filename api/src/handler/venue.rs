use crate::{
    extractor::AuthorizedAccount,
    model::{
        venue::{CreateVenueRequest, UpdateVenueRequest, VenueIdResponse, VenueResponse},
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
    id::{StadiumId, VenueId},
    venue::event::{CreateVenue, DeleteVenue, UpdateVenue},
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn register_venue(
    account: AuthorizedAccount,
    Path(stadium_id): Path<StadiumId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateVenueRequest>,
) -> AppResult<(StatusCode, Json<Envelope<VenueIdResponse>>)> {
    req.validate(&())?;

    let venue_id = registry
        .venue_repository()
        .create(CreateVenue::new(
            stadium_id,
            req.name,
            req.is_reservable,
            req.reservation_interval,
            req.court_count,
            req.capacity,
            account.id(),
        ))
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(Envelope::new(VenueIdResponse { venue_id })),
    ))
}

pub async fn show_venue_list(
    _account: AuthorizedAccount,
    Path(stadium_id): Path<StadiumId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Envelope<Vec<VenueResponse>>>> {
    let venues = registry
        .venue_repository()
        .find_by_stadium_id(stadium_id)
        .await?;
    Ok(Json(Envelope::new(
        venues.into_iter().map(VenueResponse::from).collect(),
    )))
}

pub async fn show_venue(
    _account: AuthorizedAccount,
    Path(venue_id): Path<VenueId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Envelope<VenueResponse>>> {
    registry
        .venue_repository()
        .find_by_id(venue_id)
        .await
        .and_then(|venue| match venue {
            Some(venue) => Ok(Json(Envelope::new(venue.into()))),
            None => Err(AppError::EntityNotFound(
                "ヴェニューが見つかりませんでした".into(),
            )),
        })
}

pub async fn update_venue(
    account: AuthorizedAccount,
    Path(venue_id): Path<VenueId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateVenueRequest>,
) -> AppResult<StatusCode> {
    req.validate(&())?;

    registry
        .venue_repository()
        .update(UpdateVenue {
            venue_id,
            name: req.name,
            is_reservable: req.is_reservable,
            reservation_interval: req.reservation_interval,
            capacity: req.capacity,
            requested_user: account.id(),
        })
        .await
        .map(|_| StatusCode::OK)
}

pub async fn delete_venue(
    account: AuthorizedAccount,
    Path(venue_id): Path<VenueId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .venue_repository()
        .delete(DeleteVenue {
            venue_id,
            requested_user: account.id(),
        })
        .await
        .map(|_| StatusCode::OK)
}
