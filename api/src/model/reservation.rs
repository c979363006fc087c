use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use garde::Validate;
use kernel::model::{
    id::{AccountId, CourtId, ReservationId, StadiumId, VenueId},
    range::{DateTimeRange, WeekTimeRange},
    reservation::{
        event::{CreateReservation, UpdateReservation},
        Reservation, ReservationMemberWithName, TechnicalLevel, Vacancy,
    },
};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};
use std::str::FromStr;

fn parse_technical_level(values: &[String]) -> AppResult<Vec<TechnicalLevel>> {
    values
        .iter()
        .map(|s| {
            TechnicalLevel::from_str(s)
                .map_err(|_| AppError::IllegalInput(format!("不正な技術レベルです: {s}")))
        })
        .collect()
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    #[garde(skip)]
    pub start_time: NaiveDateTime,
    #[garde(skip)]
    pub end_time: NaiveDateTime,
    #[garde(range(min = 1))]
    pub member_count: i32,
    // -1 は募集人数無制限
    #[garde(range(min = -1))]
    #[serde(default = "unlimited")]
    pub vacancy: i32,
    #[garde(skip)]
    #[serde(default)]
    pub technical_level: Vec<String>,
    #[garde(skip)]
    #[serde(default)]
    pub remark: String,
    #[garde(skip)]
    #[serde(default)]
    pub member_ids: Vec<AccountId>,
}

fn unlimited() -> i32 {
    -1
}

impl CreateReservationRequest {
    pub fn try_into_event(
        self,
        court_id: CourtId,
        reserved_by: AccountId,
        requested_at: NaiveDateTime,
    ) -> AppResult<CreateReservation> {
        let technical_level = parse_technical_level(&self.technical_level)?;
        Ok(CreateReservation::new(
            court_id,
            DateTimeRange::new(self.start_time, self.end_time),
            self.member_count,
            Vacancy::from_column(self.vacancy),
            technical_level,
            self.remark,
            reserved_by,
            self.member_ids,
            requested_at,
        ))
    }
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReservationRequest {
    #[garde(skip)]
    pub start_time: Option<NaiveDateTime>,
    #[garde(skip)]
    pub end_time: Option<NaiveDateTime>,
    #[garde(skip)]
    pub technical_level: Option<Vec<String>>,
    #[garde(skip)]
    pub remark: Option<String>,
    #[garde(inner(range(min = -1)))]
    pub vacancy: Option<i32>,
}

impl UpdateReservationRequest {
    pub fn try_into_event(
        self,
        reservation_id: ReservationId,
        requested_user: AccountId,
        requested_at: NaiveDateTime,
    ) -> AppResult<UpdateReservation> {
        // 時間帯は開始・終了をセットでのみ変更できる
        let range = match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Some(DateTimeRange::new(start, end)),
            (None, None) => None,
            _ => {
                return Err(AppError::IllegalInput(
                    "開始時刻と終了時刻は両方指定してください".into(),
                ))
            }
        };
        let technical_level = self
            .technical_level
            .as_deref()
            .map(parse_technical_level)
            .transpose()?;
        Ok(UpdateReservation::new(
            reservation_id,
            range,
            technical_level,
            self.remark,
            self.vacancy.map(Vacancy::from_column),
            requested_user,
            requested_at,
        ))
    }
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct JoinReservationRequest {
    #[garde(length(min = 1))]
    pub invitation_code: String,
}

// 空き日検索のリクエスト。startDate を指定するとその日の予約一覧、
// 省略すると今日から 1 週間の候補から最初に空いている日を探す。
// timeRanges を省略した場合は営業時間を候補に使う
#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BrowseReservationsRequest {
    #[garde(skip)]
    pub start_date: Option<NaiveDate>,
    #[garde(dive)]
    #[serde(default)]
    pub time_ranges: Vec<TimeRangeSlot>,
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TimeRangeSlot {
    #[garde(range(min = 0, max = 6))]
    pub weekday: i16,
    #[garde(skip)]
    pub start_time: NaiveTime,
    #[garde(skip)]
    pub end_time: NaiveTime,
}

impl From<&TimeRangeSlot> for WeekTimeRange {
    fn from(value: &TimeRangeSlot) -> Self {
        WeekTimeRange::new(value.weekday, value.start_time, value.end_time)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationIdResponse {
    pub reservation_id: ReservationId,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
    pub reservation_id: ReservationId,
    pub court_id: CourtId,
    pub venue_id: VenueId,
    pub stadium_id: StadiumId,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub member_count: i32,
    pub vacancy: i32,
    pub technical_level: Vec<String>,
    pub remark: String,
    pub invitation_code: String,
    pub is_cancelled: bool,
}

impl From<Reservation> for ReservationResponse {
    fn from(value: Reservation) -> Self {
        Self {
            reservation_id: value.reservation_id,
            court_id: value.court_id,
            venue_id: value.venue_id,
            stadium_id: value.stadium_id,
            start_time: value.range.start_time,
            end_time: value.range.end_time,
            member_count: value.member_count,
            vacancy: value.vacancy.into_column(),
            technical_level: value
                .technical_level
                .iter()
                .map(|l| l.as_ref().to_string())
                .collect(),
            remark: value.remark,
            invitation_code: value.invitation_code.as_str().to_string(),
            is_cancelled: value.is_cancelled,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationMemberResponse {
    pub account_id: AccountId,
    pub name: String,
    pub email: String,
    pub is_manager: bool,
    pub status: String,
    pub source: String,
}

impl From<ReservationMemberWithName> for ReservationMemberResponse {
    fn from(value: ReservationMemberWithName) -> Self {
        Self {
            account_id: value.member.account_id,
            name: value.account_name,
            email: value.email,
            is_manager: value.member.is_manager,
            status: value.member.status.as_ref().to_string(),
            source: value.member.source.as_ref().to_string(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationWithMembersResponse {
    #[serde(flatten)]
    pub reservation: ReservationResponse,
    pub members: Vec<ReservationMemberResponse>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseReservationsResponse {
    pub date: NaiveDate,
    pub reservations: Vec<ReservationResponse>,
}
