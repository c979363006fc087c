use crate::{
    extractor::AuthorizedAccount,
    model::{
        business_hour::{
            BusinessHourPlaceQuery, BusinessHourResponse, ReplaceBusinessHoursRequest,
        },
        Envelope,
    },
};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::business_hour::{event::ReplaceBusinessHours, PlaceType};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};
use std::str::FromStr;

fn parse_place_type(value: &str) -> AppResult<PlaceType> {
    PlaceType::from_str(value).map_err(|_| AppError::IllegalInput("不正な場所の種別です".into()))
}

pub async fn show_business_hours(
    _account: AuthorizedAccount,
    Query(query): Query<BusinessHourPlaceQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Envelope<Vec<BusinessHourResponse>>>> {
    let place_type = parse_place_type(&query.place_type)?;
    let hours = registry
        .business_hour_repository()
        .find_by_place(place_type, query.place_id)
        .await?;
    Ok(Json(Envelope::new(
        hours.into_iter().map(BusinessHourResponse::from).collect(),
    )))
}

// 営業時間は差分更新ではなく全件入れ替え
pub async fn replace_business_hours(
    account: AuthorizedAccount,
    Query(query): Query<BusinessHourPlaceQuery>,
    State(registry): State<AppRegistry>,
    Json(req): Json<ReplaceBusinessHoursRequest>,
) -> AppResult<StatusCode> {
    req.validate(&())?;
    for slot in &req.hours {
        if slot.start_time >= slot.end_time {
            return Err(AppError::IllegalInput(
                "営業時間の開始は終了より前である必要があります".into(),
            ));
        }
    }

    let place_type = parse_place_type(&query.place_type)?;
    let hours = req.hours.iter().map(Into::into).collect();
    registry
        .business_hour_repository()
        .replace(ReplaceBusinessHours::new(
            place_type,
            query.place_id,
            hours,
            account.id(),
        ))
        .await
        .map(|_| StatusCode::OK)
}
