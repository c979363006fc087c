use crate::model::{
    id::AccountId,
    range::DateTimeRange,
    reservation::{Reservation, ReservationMember},
    venue::Venue,
};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use shared::error::{AppError, AppResult};

// 予約の空き判定まわりの純粋関数を集めたモジュール。
// DB から取得済みの予約一覧を入力に取り、副作用は持たない。
//
// 重なり判定（has_conflict）と空き日検索（find_first_available）は
// あえて別々の述語のままにしてある。前者は予約作成・編集時の
// 衝突チェック、後者は閲覧時の「最初に空いている日」の検索に使われ、
// 判定条件が異なる（後者は「候補を完全に含み、かつ満員」のみを
// ブロックとみなす）。呼び出し側を確認せずに統一してはならない。

// 候補の時間帯が既存のキャンセルされていない予約と重なるかどうか。
// 半開区間 [s, e) 同士の判定なので、端が接しているだけでは重ならない。
// キャンセル済み予約の除外は呼び出し側の責務
pub fn has_conflict(window: &DateTimeRange, existing: &[Reservation]) -> bool {
    existing.iter().any(|r| r.range.overlaps(window))
}

// 空き日検索で候補をブロックする条件：
// 予約が候補を完全に含み、かつ募集枠が残っていない
fn blocks_candidate(candidate: &DateTimeRange, reservation: &Reservation) -> bool {
    candidate.contained_in(&reservation.range) && !reservation.vacancy.has_opening()
}

// 候補の時間帯を与えられた順に走査し、ブロックされていない
// 最初の候補の日付を返す。すべてブロックされていれば None
pub fn find_first_available(
    candidates: &[DateTimeRange],
    existing: &[Reservation],
) -> Option<NaiveDate> {
    candidates
        .iter()
        .find(|candidate| !existing.iter().any(|r| blocks_candidate(candidate, r)))
        .map(|candidate| candidate.date())
}

// 予約作成時の事前条件チェック（その 1）。
// 衝突チェックの前に行う。順序は固定で、最初に満たされなかった
// 条件のエラーで打ち切る
pub fn check_bookable(
    venue: &Venue,
    window: &DateTimeRange,
    requested_at: NaiveDateTime,
) -> AppResult<()> {
    if !venue.is_reservable {
        return Err(AppError::VenueUnreservable(format!(
            "ヴェニュー（{}）は予約を受け付けていません",
            venue.venue_id
        )));
    }
    let horizon = requested_at + Duration::days(venue.reservation_interval as i64);
    if window.start_time > horizon {
        return Err(AppError::CourtUnreservable(format!(
            "予約可能なのは {} 日先までです",
            venue.reservation_interval
        )));
    }
    Ok(())
}

// 予約作成時の事前条件チェック（その 2）。衝突チェックの後に行う
pub fn check_window(window: &DateTimeRange, requested_at: NaiveDateTime) -> AppResult<()> {
    if window.start_time < requested_at || window.start_time >= window.end_time {
        return Err(AppError::IllegalInput(
            "開始時刻は現在以降かつ終了時刻より前である必要があります".into(),
        ));
    }
    Ok(())
}

// 管理者が抜けたあとに管理者を引き継ぐメンバー。
// 残っているメンバーのうちアカウント ID が最小のもの
pub fn next_manager(remaining: &[ReservationMember]) -> Option<AccountId> {
    remaining.iter().map(|m| m.account_id).min()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        id::{CourtId, ReservationId, StadiumId, VenueId},
        reservation::{InvitationCode, MemberSource, MemberStatus, Vacancy},
    };

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    fn range(start: &str, end: &str) -> DateTimeRange {
        DateTimeRange::new(dt(start), dt(end))
    }

    fn reservation(range: DateTimeRange, vacancy: Vacancy) -> Reservation {
        Reservation {
            reservation_id: ReservationId::new(),
            court_id: CourtId::new(),
            venue_id: VenueId::new(),
            stadium_id: StadiumId::new(),
            range,
            member_count: 4,
            vacancy,
            technical_level: vec![],
            remark: String::new(),
            invitation_code: InvitationCode::generate(),
            is_cancelled: false,
            google_event_id: None,
        }
    }

    fn venue(is_reservable: bool, reservation_interval: i32) -> Venue {
        Venue {
            venue_id: VenueId::new(),
            stadium_id: StadiumId::new(),
            name: "Main Hall".into(),
            is_reservable,
            reservation_interval,
            court_count: 2,
            capacity: 20,
        }
    }

    fn member(reservation_id: ReservationId, account_id: AccountId, is_manager: bool) -> ReservationMember {
        ReservationMember {
            reservation_id,
            account_id,
            is_manager,
            status: MemberStatus::Joined,
            source: MemberSource::Booking,
        }
    }

    #[test]
    fn no_conflict_when_no_existing_reservations() {
        let window = range("2023-11-01 10:00", "2023-11-01 11:00");
        assert!(!has_conflict(&window, &[]));
    }

    #[test]
    fn touching_windows_do_not_conflict() {
        let existing = vec![reservation(
            range("2023-11-01 11:00", "2023-11-01 12:00"),
            Vacancy::Remaining(2),
        )];
        let window = range("2023-11-01 10:00", "2023-11-01 11:00");
        assert!(!has_conflict(&window, &existing));
    }

    #[test]
    fn overlapping_windows_conflict() {
        let existing = vec![reservation(
            range("2023-11-01 10:30", "2023-11-01 11:30"),
            Vacancy::Remaining(2),
        )];
        let window = range("2023-11-01 10:00", "2023-11-01 11:00");
        assert!(has_conflict(&window, &existing));
    }

    #[test]
    fn scanner_skips_fully_contained_full_day() {
        let day1 = range("2023-11-01 09:00", "2023-11-01 10:00");
        let day2 = range("2023-11-02 09:00", "2023-11-02 10:00");
        // day1 を完全に含み、かつ満員
        let existing = vec![reservation(
            range("2023-11-01 08:00", "2023-11-01 12:00"),
            Vacancy::Remaining(0),
        )];
        let found = find_first_available(&[day1, day2], &existing);
        assert_eq!(found, Some(NaiveDate::from_ymd_opt(2023, 11, 2).unwrap()));
    }

    #[test]
    fn scanner_does_not_skip_day_with_openings() {
        let day1 = range("2023-11-01 09:00", "2023-11-01 10:00");
        // 完全に含むが募集枠が残っている
        let existing = vec![reservation(
            range("2023-11-01 08:00", "2023-11-01 12:00"),
            Vacancy::Remaining(1),
        )];
        let found = find_first_available(&[day1], &existing);
        assert_eq!(found, Some(NaiveDate::from_ymd_opt(2023, 11, 1).unwrap()));
    }

    #[test]
    fn scanner_returns_none_when_all_blocked() {
        let day1 = range("2023-11-01 09:00", "2023-11-01 10:00");
        let existing = vec![reservation(
            range("2023-11-01 00:00", "2023-11-02 00:00"),
            Vacancy::Remaining(0),
        )];
        assert_eq!(find_first_available(&[day1], &existing), None);
    }

    #[test]
    fn unreservable_venue_is_rejected_first() {
        let v = venue(false, 7);
        let window = range("2023-11-02 10:00", "2023-11-02 11:00");
        let err = check_bookable(&v, &window, dt("2023-11-01 09:00")).unwrap_err();
        assert!(matches!(err, AppError::VenueUnreservable(_)));
    }

    #[test]
    fn horizon_boundary_is_inclusive() {
        let v = venue(true, 7);
        let requested_at = dt("2023-11-01 09:00");
        // 7 日先ちょうどは可
        let within = range("2023-11-07 10:00", "2023-11-07 11:00");
        assert!(check_bookable(&v, &within, requested_at).is_ok());
        // 8 日先は不可
        let beyond = range("2023-11-09 10:00", "2023-11-09 11:00");
        let err = check_bookable(&v, &beyond, requested_at).unwrap_err();
        assert!(matches!(err, AppError::CourtUnreservable(_)));
    }

    #[test]
    fn past_or_inverted_windows_are_illegal() {
        let requested_at = dt("2023-11-01 09:00");
        let past = range("2023-11-01 08:00", "2023-11-01 09:30");
        assert!(matches!(
            check_window(&past, requested_at).unwrap_err(),
            AppError::IllegalInput(_)
        ));
        let inverted = range("2023-11-01 11:00", "2023-11-01 10:00");
        assert!(matches!(
            check_window(&inverted, requested_at).unwrap_err(),
            AppError::IllegalInput(_)
        ));
        let ok = range("2023-11-01 10:00", "2023-11-01 11:00");
        assert!(check_window(&ok, requested_at).is_ok());
    }

    #[test]
    fn lowest_remaining_account_becomes_manager() {
        let reservation_id = ReservationId::new();
        let mut ids: Vec<AccountId> = (0..3).map(|_| AccountId::new()).collect();
        ids.sort();
        // 管理者（最小 ID）が抜けた残り
        let remaining = vec![
            member(reservation_id, ids[2], false),
            member(reservation_id, ids[1], false),
        ];
        assert_eq!(next_manager(&remaining), Some(ids[1]));
        assert_eq!(next_manager(&[]), None);
    }
}
