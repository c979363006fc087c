use crate::model::{
    id::{AccountId, CourtId, ReservationId},
    range::DateTimeRange,
    reservation::{InvitationCode, TechnicalLevel, Vacancy},
};
use chrono::NaiveDateTime;
use derive_new::new;

#[derive(new)]
pub struct CreateReservation {
    pub court_id: CourtId,
    pub range: DateTimeRange,
    pub member_count: i32,
    pub vacancy: Vacancy,
    pub technical_level: Vec<TechnicalLevel>,
    pub remark: String,
    pub reserved_by: AccountId,
    pub member_ids: Vec<AccountId>,
    // リクエスト時刻。ハンドラーで一度だけ取得して明示的に引き回す
    pub requested_at: NaiveDateTime,
}

#[derive(new)]
pub struct UpdateReservation {
    pub reservation_id: ReservationId,
    pub range: Option<DateTimeRange>,
    pub technical_level: Option<Vec<TechnicalLevel>>,
    pub remark: Option<String>,
    pub vacancy: Option<Vacancy>,
    pub requested_user: AccountId,
    pub requested_at: NaiveDateTime,
}

#[derive(new)]
pub struct CancelReservation {
    pub reservation_id: ReservationId,
    pub requested_user: AccountId,
}

#[derive(new)]
pub struct JoinReservation {
    pub invitation_code: InvitationCode,
    pub account_id: AccountId,
}

#[derive(new)]
pub struct LeaveReservation {
    pub reservation_id: ReservationId,
    pub account_id: AccountId,
}

#[derive(new)]
pub struct RejectInvitation {
    pub reservation_id: ReservationId,
    pub account_id: AccountId,
}
