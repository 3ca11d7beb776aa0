use chrono::{Datelike, NaiveDate};

/// The canonical storage key for a calendar date: `"{year}-{month}-{day}"`,
/// 1-based month, no zero padding. Every lookup and every write must go
/// through this function; two differently padded keys for the same date would
/// desynchronize badges from selection.
pub fn date_key(year: i32, month: u32, day: u32) -> String {
    format!("{}-{}-{}", year, month, day)
}

/// Number of days in the given month, via day 0 of the next month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month, 1).expect("valid month");
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .expect("valid month");
    next.signed_duration_since(first).num_days() as u32
}

/// Weekday index of the 1st of the month, Sunday = 0.
pub fn leading_blanks(year: i32, month: u32) -> u32 {
    NaiveDate::from_ymd_opt(year, month, 1)
        .expect("valid month")
        .weekday()
        .num_days_from_sunday()
}

/// The visual month grid: leading `None` cells up to the weekday of the 1st,
/// then `Some(1..=days_in_month)` in order. Callers chunk this into rows of 7.
pub fn month_grid(year: i32, month: u32) -> Vec<Option<u32>> {
    let blanks = leading_blanks(year, month);
    let days = days_in_month(year, month);
    let mut cells = Vec::with_capacity((blanks + days) as usize);
    cells.extend(std::iter::repeat(None).take(blanks as usize));
    cells.extend((1..=days).map(Some));
    cells
}

/// Add `delta` months to `(year, month)`, carrying across year boundaries in
/// both directions.
pub fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let index = year * 12 + (month as i32 - 1) + delta;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_length_is_blanks_plus_days() {
        for year in [1999, 2000, 2023, 2024] {
            for month in 1..=12 {
                let grid = month_grid(year, month);
                let expected = leading_blanks(year, month) + days_in_month(year, month);
                assert_eq!(grid.len() as u32, expected, "{}-{}", year, month);
            }
        }
    }

    #[test]
    fn grid_days_are_in_order_after_blanks() {
        let grid = month_grid(2024, 10);
        let blanks = leading_blanks(2024, 10) as usize;
        assert!(grid[..blanks].iter().all(Option::is_none));
        let days: Vec<u32> = grid[blanks..].iter().map(|c| c.unwrap()).collect();
        let expected: Vec<u32> = (1..=days_in_month(2024, 10)).collect();
        assert_eq!(days, expected);
    }

    #[test]
    fn february_follows_leap_years() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(
            month_grid(2024, 2).iter().filter(|c| c.is_some()).count(),
            29
        );
        assert_eq!(
            month_grid(2023, 2).iter().filter(|c| c.is_some()).count(),
            28
        );
    }

    #[test]
    fn month_lengths() {
        let lengths: Vec<u32> = (1..=12).map(|m| days_in_month(2023, m)).collect();
        assert_eq!(lengths, [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]);
    }

    #[test]
    fn shift_month_carries_across_years() {
        assert_eq!(shift_month(2024, 12, 1), (2025, 1));
        assert_eq!(shift_month(2025, 1, -1), (2024, 12));
        assert_eq!(shift_month(2024, 6, 19), (2026, 1));
        assert_eq!(shift_month(2024, 6, -18), (2022, 12));
    }

    #[test]
    fn shift_month_round_trips() {
        for (year, month) in [(2024, 1), (2024, 12), (2023, 6)] {
            let (y, m) = shift_month(year, month, 1);
            assert_eq!(shift_month(y, m, -1), (year, month));
            let (y, m) = shift_month(year, month, -1);
            assert_eq!(shift_month(y, m, 1), (year, month));
        }
    }

    #[test]
    fn date_key_has_no_padding() {
        assert_eq!(date_key(2024, 3, 7), "2024-3-7");
        assert_eq!(date_key(2024, 12, 25), "2024-12-25");
    }
}
