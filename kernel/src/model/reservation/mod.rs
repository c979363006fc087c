use crate::model::{
    id::{AccountId, CourtId, ReservationId, StadiumId, VenueId},
    range::DateTimeRange,
};
use rand::Rng;
use strum::{AsRefStr, EnumString};

pub mod event;

#[derive(Debug, Clone)]
pub struct Reservation {
    pub reservation_id: ReservationId,
    pub court_id: CourtId,
    pub venue_id: VenueId,
    pub stadium_id: StadiumId,
    pub range: DateTimeRange,
    pub member_count: i32,
    pub vacancy: Vacancy,
    pub technical_level: Vec<TechnicalLevel>,
    pub remark: String,
    pub invitation_code: InvitationCode,
    pub is_cancelled: bool,
    pub google_event_id: Option<String>,
}

// 残り募集人数。DB 上は -1 を「無制限」の番兵値として保存しているが、
// ドメイン上は明示的なタグ付きの値として扱う
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vacancy {
    Unlimited,
    Remaining(i32),
}

impl Vacancy {
    pub fn from_column(value: i32) -> Self {
        if value < 0 {
            Self::Unlimited
        } else {
            Self::Remaining(value)
        }
    }

    pub fn into_column(self) -> i32 {
        match self {
            Self::Unlimited => -1,
            Self::Remaining(n) => n,
        }
    }

    // 参加を受け付けられるかどうか。満員の判定はこの一箇所に集約する
    pub fn has_opening(&self) -> bool {
        match self {
            Self::Unlimited => true,
            Self::Remaining(n) => *n > 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum TechnicalLevel {
    Beginner,
    Intermediate,
    Advanced,
}

// 予約参加用の招待コード。小文字アルファベット 8 文字
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvitationCode(String);

pub const INVITATION_CODE_LEN: usize = 8;

impl InvitationCode {
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let code = (0..INVITATION_CODE_LEN)
            .map(|_| rng.gen_range(b'a'..=b'z') as char)
            .collect();
        Self(code)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for InvitationCode {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone)]
pub struct ReservationMember {
    pub reservation_id: ReservationId,
    pub account_id: AccountId,
    pub is_manager: bool,
    pub status: MemberStatus,
    pub source: MemberSource,
}

// invited -> joined（参加）/ rejected（辞退、終端）。
// joined からの離脱は行の削除で表す
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum MemberStatus {
    Invited,
    Joined,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum MemberSource {
    Booking,
    Invitation,
    InvitationCode,
}

#[derive(Debug)]
pub struct ReservationMemberWithName {
    pub member: ReservationMember,
    pub account_name: String,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vacancy_round_trips_through_sentinel_column() {
        assert_eq!(Vacancy::from_column(-1), Vacancy::Unlimited);
        assert_eq!(Vacancy::from_column(0), Vacancy::Remaining(0));
        assert_eq!(Vacancy::Unlimited.into_column(), -1);
        assert_eq!(Vacancy::Remaining(3).into_column(), 3);
    }

    #[test]
    fn vacancy_opening_predicate() {
        assert!(Vacancy::Unlimited.has_opening());
        assert!(Vacancy::Remaining(1).has_opening());
        assert!(!Vacancy::Remaining(0).has_opening());
    }

    #[test]
    fn invitation_code_is_fixed_length_lowercase() {
        let code = InvitationCode::generate();
        assert_eq!(code.as_str().len(), INVITATION_CODE_LEN);
        assert!(code.as_str().chars().all(|c| c.is_ascii_lowercase()));
    }
}
