//! Weekly sample boundaries.

use burndown_core::Date;
use chrono::Days;

/// Days between two checkpoints.
pub const WEEK: Days = Days::new(7);

/// Weekly checkpoints from `start` through the last one on or before `as_of`.
///
/// Empty when `start` is after `as_of`.
pub fn week_checkpoints(start: Date, as_of: Date) -> Vec<Date> {
    std::iter::successors(Some(start), |date| date.checked_add_days(WEEK))
        .take_while(|date| *date <= as_of)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_includes_checkpoint_on_as_of() {
        let weeks = week_checkpoints(date(2024, 1, 1), date(2024, 1, 22));
        assert_eq!(
            weeks,
            vec![date(2024, 1, 1), date(2024, 1, 8), date(2024, 1, 15), date(2024, 1, 22)]
        );
    }

    #[test]
    fn test_stops_before_as_of() {
        let weeks = week_checkpoints(date(2024, 1, 1), date(2024, 1, 21));
        assert_eq!(weeks.len(), 3);
        assert_eq!(weeks.last(), Some(&date(2024, 1, 15)));
    }

    #[test]
    fn test_single_and_empty_ranges() {
        assert_eq!(week_checkpoints(date(2024, 1, 1), date(2024, 1, 1)), vec![date(2024, 1, 1)]);
        assert!(week_checkpoints(date(2024, 2, 1), date(2024, 1, 1)).is_empty());
    }
}
