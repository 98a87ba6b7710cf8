//! Calendar-day comparison. Works on dates only, never on elapsed time, so
//! 23:59 followed by 00:01 counts as consecutive days.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayRelation {
    SameDay,
    /// `last` is the day before `today`.
    Consecutive,
    /// `last` is two or more days before `today`; holds the day count.
    Gap(i64),
    /// `last` is after `today` (clock moved backwards).
    Future,
}

pub fn day_relation(last: NaiveDate, today: NaiveDate) -> DayRelation {
    match (today - last).num_days() {
        0 => DayRelation::SameDay,
        1 => DayRelation::Consecutive,
        n if n > 1 => DayRelation::Gap(n),
        _ => DayRelation::Future,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn same_and_next_day() {
        assert_eq!(day_relation(d(2024, 5, 10), d(2024, 5, 10)), DayRelation::SameDay);
        assert_eq!(day_relation(d(2024, 5, 9), d(2024, 5, 10)), DayRelation::Consecutive);
    }

    #[test]
    fn crosses_month_and_year_boundaries() {
        assert_eq!(day_relation(d(2024, 2, 29), d(2024, 3, 1)), DayRelation::Consecutive);
        assert_eq!(day_relation(d(2023, 12, 31), d(2024, 1, 1)), DayRelation::Consecutive);
    }

    #[test]
    fn gaps_and_future_dates() {
        assert_eq!(day_relation(d(2024, 5, 8), d(2024, 5, 10)), DayRelation::Gap(2));
        assert_eq!(day_relation(d(2023, 5, 10), d(2024, 5, 10)), DayRelation::Gap(366));
        assert_eq!(day_relation(d(2024, 5, 11), d(2024, 5, 10)), DayRelation::Future);
    }
}
