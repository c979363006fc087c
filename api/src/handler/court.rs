use crate::{
    extractor::AuthorizedAccount,
    model::{
        court::{
            CourtIdResponse, CourtResponse, CreateCourtRequest, UpdateCourtPublishedRequest,
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
    court::event::{CreateCourt, UpdateCourtPublished},
    id::{CourtId, VenueId},
};
use registry::AppRegistry;
use shared::error::AppResult;

pub async fn register_court(
    account: AuthorizedAccount,
    Path(venue_id): Path<VenueId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateCourtRequest>,
) -> AppResult<(StatusCode, Json<Envelope<CourtIdResponse>>)> {
    req.validate(&())?;

    let court_id = registry
        .court_repository()
        .create(CreateCourt::new(venue_id, req.number, account.id()))
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(Envelope::new(CourtIdResponse { court_id })),
    ))
}

pub async fn show_court_list(
    _account: AuthorizedAccount,
    Path(venue_id): Path<VenueId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Envelope<Vec<CourtResponse>>>> {
    let courts = registry.court_repository().find_by_venue_id(venue_id).await?;
    Ok(Json(Envelope::new(
        courts.into_iter().map(CourtResponse::from).collect(),
    )))
}

pub async fn update_court_published(
    account: AuthorizedAccount,
    Path(court_id): Path<CourtId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateCourtPublishedRequest>,
) -> AppResult<StatusCode> {
    registry
        .court_repository()
        .set_published(UpdateCourtPublished::new(
            court_id,
            req.is_published,
            account.id(),
        ))
        .await
        .map(|_| StatusCode::OK)
}
