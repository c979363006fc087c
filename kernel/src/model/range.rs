use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

// 予約や空き検索で使う [start_time, end_time) の半開区間。
// 妥当性（start < end）はここでは検証しない。予約作成時の
// 事前条件チェックの順序が決まっているため、チェックは
// availability モジュール側で行う。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTimeRange {
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
}

impl DateTimeRange {
    pub fn new(start_time: NaiveDateTime, end_time: NaiveDateTime) -> Self {
        Self {
            start_time,
            end_time,
        }
    }

    // 1 日分（その日の 00:00 から翌日の 00:00）の区間を作る
    pub fn whole_day(date: NaiveDate) -> Self {
        let start_time = date.and_time(NaiveTime::MIN);
        Self {
            start_time,
            end_time: start_time + Duration::days(1),
        }
    }

    // 半開区間同士の重なり判定。端が接している場合は重ならない扱い
    pub fn overlaps(&self, other: &DateTimeRange) -> bool {
        self.start_time < other.end_time && self.end_time > other.start_time
    }

    // other が self を完全に含むかどうか
    pub fn contained_in(&self, other: &DateTimeRange) -> bool {
        other.start_time <= self.start_time && other.end_time >= self.end_time
    }

    pub fn date(&self) -> NaiveDate {
        self.start_time.date()
    }
}

// 毎週繰り返す時間帯。weekday は月曜を 0 とする 0..=6
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekTimeRange {
    pub weekday: i16,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl WeekTimeRange {
    pub fn new(weekday: i16, start_time: NaiveTime, end_time: NaiveTime) -> Self {
        Self {
            weekday,
            start_time,
            end_time,
        }
    }

    pub fn matches(&self, date: NaiveDate) -> bool {
        weekday_of(date) == self.weekday
    }

    // 指定日に重ねて絶対区間にする
    pub fn on_date(&self, date: NaiveDate) -> DateTimeRange {
        DateTimeRange {
            start_time: date.and_time(self.start_time),
            end_time: date.and_time(self.end_time),
        }
    }
}

pub fn weekday_of(date: NaiveDate) -> i16 {
    use chrono::Datelike;
    date.weekday().num_days_from_monday() as i16
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    #[test]
    fn overlap_is_symmetric() {
        let a = DateTimeRange::new(dt("2023-11-01 10:00"), dt("2023-11-01 11:00"));
        let b = DateTimeRange::new(dt("2023-11-01 10:30"), dt("2023-11-01 11:30"));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn touching_ranges_do_not_overlap() {
        let a = DateTimeRange::new(dt("2023-11-01 10:00"), dt("2023-11-01 11:00"));
        let b = DateTimeRange::new(dt("2023-11-01 11:00"), dt("2023-11-01 12:00"));
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn week_time_range_projects_onto_date() {
        // 2023-11-06 は月曜日
        let monday = NaiveDate::from_ymd_opt(2023, 11, 6).unwrap();
        let range = WeekTimeRange::new(
            0,
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
        );
        assert!(range.matches(monday));
        let projected = range.on_date(monday);
        assert_eq!(projected.start_time, dt("2023-11-06 09:00"));
        assert_eq!(projected.end_time, dt("2023-11-06 18:00"));
    }
}
