use crate::{
    extractor::AuthorizedAccount,
    model::{
        reservation::{
            BrowseReservationsRequest, BrowseReservationsResponse, CreateReservationRequest,
            JoinReservationRequest, ReservationIdResponse, ReservationMemberResponse,
            ReservationResponse, ReservationWithMembersResponse, UpdateReservationRequest,
        },
        Envelope,
    },
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{Duration, Local, NaiveDate};
use garde::Validate;
use kernel::availability;
use kernel::model::{
    business_hour::PlaceType,
    court::Court,
    id::{CourtId, ReservationId},
    range::{DateTimeRange, WeekTimeRange},
    reservation::{
        event::{CancelReservation, JoinReservation, LeaveReservation, RejectInvitation},
        Reservation,
    },
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn register_reservation(
    account: AuthorizedAccount,
    Path(court_id): Path<CourtId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateReservationRequest>,
) -> AppResult<(StatusCode, Json<Envelope<ReservationIdResponse>>)> {
    req.validate(&())?;

    let requested_at = Local::now().naive_local();
    let event = req.try_into_event(court_id, account.id(), requested_at)?;
    let member_ids = event.member_ids.clone();
    let reservation_id = registry.reservation_repository().create(event).await?;
    let reservation = registry
        .reservation_repository()
        .find_by_id(reservation_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound("予約が見つかりませんでした".into()))?;

    // 招待メールとカレンダー連携はベストエフォート。
    // 失敗しても予約自体は成立させる
    if !member_ids.is_empty() {
        match registry.account_repository().emails_of(&member_ids).await {
            Ok(emails) => {
                if let Err(e) = registry
                    .mail_client()
                    .send_invitation(reservation.invitation_code.as_str(), &emails)
                    .await
                {
                    tracing::warn!(error.message = %e, "招待メールの送信に失敗しました");
                }
            }
            Err(e) => {
                tracing::warn!(error.message = %e, "招待先メールアドレスの取得に失敗しました")
            }
        }
    }
    if let Err(e) = insert_calendar_event(&registry, &account, &reservation).await {
        tracing::warn!(error.message = %e, "カレンダーへの予定作成に失敗しました");
    }

    Ok((
        StatusCode::CREATED,
        Json(Envelope::new(ReservationIdResponse {
            reservation_id: reservation.reservation_id,
        })),
    ))
}

// 予約者が Google 連携済みであればカレンダーに予定を作り、
// イベント ID を予約に紐づける
async fn insert_calendar_event(
    registry: &AppRegistry,
    account: &AuthorizedAccount,
    reservation: &Reservation,
) -> AppResult<()> {
    let Some(refresh_token) = registry
        .account_repository()
        .google_refresh_token(account.id())
        .await?
    else {
        return Ok(());
    };
    let venue = registry
        .venue_repository()
        .find_by_id(reservation.venue_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound("ヴェニューが見つかりませんでした".into()))?;
    let stadium = registry
        .stadium_repository()
        .find_by_id(reservation.stadium_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound("スタジアムが見つかりませんでした".into()))?;

    let summary = format!("{} {}", stadium.name, venue.name);
    let event_id = registry
        .calendar_client()
        .insert_event(&refresh_token, &summary, &stadium.address, &reservation.range)
        .await?;
    registry
        .reservation_repository()
        .set_google_event_id(reservation.reservation_id, &event_id)
        .await
}

// 指定日（または今日から 1 週間のうち最初に空きのある日）の予約一覧
pub async fn browse_reservations(
    _account: AuthorizedAccount,
    Path(court_id): Path<CourtId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<BrowseReservationsRequest>,
) -> AppResult<Json<Envelope<BrowseReservationsResponse>>> {
    req.validate(&())?;

    let court = registry
        .court_repository()
        .find_by_id(court_id)
        .await?
        .filter(|c| c.is_published)
        .ok_or_else(|| AppError::EntityNotFound("コートが見つかりませんでした".into()))?;

    if let Some(date) = req.start_date {
        let reservations = fetch_day(&registry, court_id, date).await?;
        return Ok(Json(Envelope::new(BrowseReservationsResponse {
            date,
            reservations,
        })));
    }

    // 候補の時間帯：リクエストで指定があればそれを、なければ営業時間を使う
    let slots: Vec<WeekTimeRange> = if req.time_ranges.is_empty() {
        weekly_business_hours(&registry, &court).await?
    } else {
        req.time_ranges.iter().map(Into::into).collect()
    };

    let today = Local::now().date_naive();
    let mut candidates = Vec::new();
    for offset in 0..7 {
        let date = today + Duration::days(offset);
        for slot in &slots {
            if slot.matches(date) {
                candidates.push(slot.on_date(date));
            }
        }
    }
    if candidates.is_empty() {
        return Err(AppError::EntityNotFound(
            "候補となる時間帯がありません".into(),
        ));
    }

    let existing = registry
        .reservation_repository()
        .find_by_court_id(court_id, None)
        .await?;
    let date = availability::find_first_available(&candidates, &existing).ok_or_else(|| {
        AppError::EntityNotFound("1 週間以内に空いている日がありません".into())
    })?;

    let reservations = fetch_day(&registry, court_id, date).await?;
    Ok(Json(Envelope::new(BrowseReservationsResponse {
        date,
        reservations,
    })))
}

async fn fetch_day(
    registry: &AppRegistry,
    court_id: CourtId,
    date: NaiveDate,
) -> AppResult<Vec<ReservationResponse>> {
    let reservations = registry
        .reservation_repository()
        .find_by_court_id(court_id, Some(DateTimeRange::whole_day(date)))
        .await?;
    Ok(reservations
        .into_iter()
        .map(ReservationResponse::from)
        .collect())
}

// ヴェニューの営業時間。未登録ならスタジアム側へフォールバックする
async fn weekly_business_hours(
    registry: &AppRegistry,
    court: &Court,
) -> AppResult<Vec<WeekTimeRange>> {
    let hours = registry
        .business_hour_repository()
        .find_by_place(PlaceType::Venue, court.venue_id.raw())
        .await?;
    let hours = if hours.is_empty() {
        let venue = registry
            .venue_repository()
            .find_by_id(court.venue_id)
            .await?
            .ok_or_else(|| AppError::EntityNotFound("ヴェニューが見つかりませんでした".into()))?;
        registry
            .business_hour_repository()
            .find_by_place(PlaceType::Stadium, venue.stadium_id.raw())
            .await?
    } else {
        hours
    };
    if hours.is_empty() {
        return Err(AppError::EntityNotFound(
            "営業時間が登録されていません".into(),
        ));
    }
    Ok(hours
        .into_iter()
        .map(|h| WeekTimeRange::new(h.weekday, h.start_time, h.end_time))
        .collect())
}

pub async fn show_my_reservations(
    account: AuthorizedAccount,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Envelope<Vec<ReservationResponse>>>> {
    let reservations = registry
        .reservation_repository()
        .find_by_account_id(account.id())
        .await?;
    Ok(Json(Envelope::new(
        reservations
            .into_iter()
            .map(ReservationResponse::from)
            .collect(),
    )))
}

pub async fn show_reservation(
    _account: AuthorizedAccount,
    Path(reservation_id): Path<ReservationId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Envelope<ReservationWithMembersResponse>>> {
    let reservation = registry
        .reservation_repository()
        .find_by_id(reservation_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound("予約が見つかりませんでした".into()))?;
    let members = registry
        .reservation_member_repository()
        .find_with_names(reservation_id)
        .await?;
    Ok(Json(Envelope::new(ReservationWithMembersResponse {
        reservation: reservation.into(),
        members: members
            .into_iter()
            .map(ReservationMemberResponse::from)
            .collect(),
    })))
}

pub async fn update_reservation(
    account: AuthorizedAccount,
    Path(reservation_id): Path<ReservationId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateReservationRequest>,
) -> AppResult<StatusCode> {
    req.validate(&())?;

    let requested_at = Local::now().naive_local();
    let event = req.try_into_event(reservation_id, account.id(), requested_at)?;
    let range_changed = event.range.is_some();
    registry.reservation_repository().update(event).await?;

    // 時間帯が変わった場合はカレンダーの予定も追従させる（ベストエフォート）
    if range_changed {
        if let Err(e) = patch_calendar_event(&registry, &account, reservation_id).await {
            tracing::warn!(error.message = %e, "カレンダーの予定更新に失敗しました");
        }
    }
    Ok(StatusCode::OK)
}

async fn patch_calendar_event(
    registry: &AppRegistry,
    account: &AuthorizedAccount,
    reservation_id: ReservationId,
) -> AppResult<()> {
    let reservation = registry
        .reservation_repository()
        .find_by_id(reservation_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound("予約が見つかりませんでした".into()))?;
    let Some(event_id) = reservation.google_event_id.as_deref() else {
        return Ok(());
    };
    let Some(refresh_token) = registry
        .account_repository()
        .google_refresh_token(account.id())
        .await?
    else {
        return Ok(());
    };
    registry
        .calendar_client()
        .patch_event(&refresh_token, event_id, &reservation.range)
        .await
}

pub async fn cancel_reservation(
    account: AuthorizedAccount,
    Path(reservation_id): Path<ReservationId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .reservation_repository()
        .cancel(CancelReservation::new(reservation_id, account.id()))
        .await
        .map(|_| StatusCode::OK)
}

pub async fn join_reservation(
    account: AuthorizedAccount,
    State(registry): State<AppRegistry>,
    Json(req): Json<JoinReservationRequest>,
) -> AppResult<Json<Envelope<ReservationResponse>>> {
    req.validate(&())?;

    let reservation_id = registry
        .reservation_member_repository()
        .join(JoinReservation::new(
            req.invitation_code.into(),
            account.id(),
        ))
        .await?;
    let reservation = registry
        .reservation_repository()
        .find_by_id(reservation_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound("予約が見つかりませんでした".into()))?;

    // カレンダーの予定に参加者として追加する（ベストエフォート）
    if let Err(e) = add_calendar_attendee(&registry, &account, &reservation).await {
        tracing::warn!(error.message = %e, "カレンダーへの参加者追加に失敗しました");
    }

    Ok(Json(Envelope::new(reservation.into())))
}

// カレンダーの予定は管理者のアカウントに紐づいているため、
// 管理者のリフレッシュトークンで参加者を追記する
async fn add_calendar_attendee(
    registry: &AppRegistry,
    account: &AuthorizedAccount,
    reservation: &Reservation,
) -> AppResult<()> {
    let Some(event_id) = reservation.google_event_id.as_deref() else {
        return Ok(());
    };
    let members = registry
        .reservation_member_repository()
        .find_with_names(reservation.reservation_id)
        .await?;
    let Some(manager) = members.iter().find(|m| m.member.is_manager) else {
        return Ok(());
    };
    let Some(refresh_token) = registry
        .account_repository()
        .google_refresh_token(manager.member.account_id)
        .await?
    else {
        return Ok(());
    };
    registry
        .calendar_client()
        .add_attendee(&refresh_token, event_id, account.email())
        .await
}

pub async fn leave_reservation(
    account: AuthorizedAccount,
    Path(reservation_id): Path<ReservationId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .reservation_member_repository()
        .leave(LeaveReservation::new(reservation_id, account.id()))
        .await
        .map(|_| StatusCode::OK)
}

pub async fn reject_invitation(
    account: AuthorizedAccount,
    Path(reservation_id): Path<ReservationId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .reservation_member_repository()
        .reject(RejectInvitation::new(reservation_id, account.id()))
        .await
        .map(|_| StatusCode::OK)
}
