use chrono::NaiveDateTime;
use kernel::model::{
    id::{AccountId, CourtId, ReservationId, StadiumId, VenueId},
    range::DateTimeRange,
    reservation::{
        MemberSource, MemberStatus, Reservation, ReservationMember, ReservationMemberWithName,
        TechnicalLevel, Vacancy,
    },
};
use shared::error::AppError;
use std::str::FromStr;

// キャンセルされていない予約の一覧を取得する際に使う型
#[derive(sqlx::FromRow)]
pub struct ReservationRow {
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
    pub google_event_id: Option<String>,
}

impl TryFrom<ReservationRow> for Reservation {
    type Error = AppError;

    fn try_from(value: ReservationRow) -> Result<Self, Self::Error> {
        let ReservationRow {
            reservation_id,
            court_id,
            venue_id,
            stadium_id,
            start_time,
            end_time,
            member_count,
            vacancy,
            technical_level,
            remark,
            invitation_code,
            is_cancelled,
            google_event_id,
        } = value;
        let technical_level = technical_level
            .iter()
            .map(|s| {
                TechnicalLevel::from_str(s)
                    .map_err(|e| AppError::ConversionEntityError(e.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Reservation {
            reservation_id,
            court_id,
            venue_id,
            stadium_id,
            range: DateTimeRange::new(start_time, end_time),
            member_count,
            vacancy: Vacancy::from_column(vacancy),
            technical_level,
            remark,
            invitation_code: invitation_code.into(),
            is_cancelled,
            google_event_id,
        })
    }
}

#[derive(sqlx::FromRow)]
pub struct MemberRow {
    pub reservation_id: ReservationId,
    pub account_id: AccountId,
    pub is_manager: bool,
    pub status: String,
    pub source: String,
}

impl TryFrom<MemberRow> for ReservationMember {
    type Error = AppError;

    fn try_from(value: MemberRow) -> Result<Self, Self::Error> {
        let MemberRow {
            reservation_id,
            account_id,
            is_manager,
            status,
            source,
        } = value;
        Ok(ReservationMember {
            reservation_id,
            account_id,
            is_manager,
            status: MemberStatus::from_str(&status)
                .map_err(|e| AppError::ConversionEntityError(e.to_string()))?,
            source: MemberSource::from_str(&source)
                .map_err(|e| AppError::ConversionEntityError(e.to_string()))?,
        })
    }
}

// メンバー一覧をアカウント名・メールアドレス付きで取得する際に使う型
#[derive(sqlx::FromRow)]
pub struct MemberWithNameRow {
    pub reservation_id: ReservationId,
    pub account_id: AccountId,
    pub is_manager: bool,
    pub status: String,
    pub source: String,
    pub account_name: String,
    pub email: String,
}

impl TryFrom<MemberWithNameRow> for ReservationMemberWithName {
    type Error = AppError;

    fn try_from(value: MemberWithNameRow) -> Result<Self, Self::Error> {
        let MemberWithNameRow {
            reservation_id,
            account_id,
            is_manager,
            status,
            source,
            account_name,
            email,
        } = value;
        let member = MemberRow {
            reservation_id,
            account_id,
            is_manager,
            status,
            source,
        }
        .try_into()?;
        Ok(ReservationMemberWithName {
            member,
            account_name,
            email,
        })
    }
}
