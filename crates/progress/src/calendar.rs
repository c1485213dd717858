//! Business-day arithmetic on a five-day work week.

use burndown_core::Date;
use chrono::{Datelike, Days, Weekday};

/// Whether the date falls on a Saturday or Sunday.
pub fn is_weekend(date: Date) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Advance `start` by `days` working days, skipping weekends.
///
/// Zero days returns `start` unchanged. A weekend start counts from the
/// preceding Friday, so one day after a Saturday is the next Monday.
/// `None` when the result falls outside the calendar.
pub fn add_business_days(start: Date, days: u64) -> Option<Date> {
    if days == 0 {
        return Some(start);
    }

    let anchor = match start.weekday() {
        Weekday::Sat => start.checked_sub_days(Days::new(1))?,
        Weekday::Sun => start.checked_sub_days(Days::new(2))?,
        _ => start,
    };

    let mut date = anchor.checked_add_days(Days::new((days / 5).checked_mul(7)?))?;
    let mut remaining = days % 5;
    while remaining > 0 {
        date = date.checked_add_days(Days::new(1))?;
        if !is_weekend(date) {
            remaining -= 1;
        }
    }
    Some(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_zero_days_is_identity() {
        assert_eq!(add_business_days(date(2024, 1, 6), 0), Some(date(2024, 1, 6)));
    }

    #[test]
    fn test_within_week() {
        // Monday + 3 -> Thursday
        assert_eq!(add_business_days(date(2024, 1, 1), 3), Some(date(2024, 1, 4)));
    }

    #[test]
    fn test_skips_weekend() {
        // Friday + 1 -> Monday
        assert_eq!(add_business_days(date(2024, 1, 5), 1), Some(date(2024, 1, 8)));
        // Thursday + 2 -> Monday
        assert_eq!(add_business_days(date(2024, 1, 4), 2), Some(date(2024, 1, 8)));
    }

    #[test]
    fn test_whole_weeks() {
        assert_eq!(add_business_days(date(2024, 1, 1), 5), Some(date(2024, 1, 8)));
        assert_eq!(add_business_days(date(2024, 1, 22), 23), Some(date(2024, 2, 22)));
    }

    #[test]
    fn test_weekend_start() {
        assert_eq!(add_business_days(date(2024, 1, 6), 1), Some(date(2024, 1, 8)));
        assert_eq!(add_business_days(date(2024, 1, 7), 5), Some(date(2024, 1, 12)));
    }

    #[test]
    fn test_result_never_on_weekend() {
        let start = date(2024, 3, 1);
        for offset in 0..14 {
            let from = start + Days::new(offset);
            for n in 1..30 {
                let to = add_business_days(from, n).unwrap();
                assert!(!is_weekend(to), "{} + {} landed on {}", from, n, to);
                assert!(to > from);
            }
        }
    }

    #[test]
    fn test_overflow_is_none() {
        assert_eq!(add_business_days(date(2024, 1, 1), u64::MAX), None);
    }
}
