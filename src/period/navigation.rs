//! Forward-navigation guard
//!
//! `is_upcoming` reports whether stepping the selection forward would move
//! past "now". Callers consult it before stepping; `builder::advance` itself
//! never refuses to move. Both sides are advanced one unit and compared at
//! the period's own granularity, so a week selected from its Sunday still
//! matches a "now" that falls on the following Friday.

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, Timelike};

use crate::period::builder::{month_start_of, sunday_on_or_before};
use crate::period::Period;

/// Whether the period one step forward from this one has not begun yet
pub fn is_upcoming(period: &Period, now: NaiveDateTime) -> bool {
    match period {
        Period::Hour { anchor } => {
            anchor.date() == now.date() && anchor.hour() == now.hour()
        }
        Period::Day { anchor } => *anchor == now.date(),
        Period::Week { .. } => {
            next_week_start(period.first_date()) == next_week_start(now.date())
        }
        Period::Month { .. } => next_month(period.first_date()) == next_month(now.date()),
        Period::HalfYear { .. } | Period::Year { .. } => {
            next_month(period.last_date()) == next_month(now.date())
        }
    }
}

fn next_week_start(date: NaiveDate) -> Option<NaiveDate> {
    sunday_on_or_before(date).checked_add_signed(Duration::days(7))
}

fn next_month(date: NaiveDate) -> Option<(i32, u32)> {
    month_start_of(date)
        .checked_add_months(Months::new(1))
        .map(|m| (m.year(), m.month()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::period::builder::period_for;
    use crate::period::Granularity;

    fn noon(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_day_guard() {
        let now = noon(2022, 4, 8);
        let today = period_for(Granularity::Day, now);
        let yesterday = period_for(Granularity::Day, noon(2022, 4, 7));
        assert!(is_upcoming(&today, now));
        assert!(!is_upcoming(&yesterday, now));
    }

    #[test]
    fn test_hour_guard() {
        let now = noon(2022, 4, 8);
        let this_hour = period_for(Granularity::Hour, now);
        let last_hour = period_for(
            Granularity::Hour,
            NaiveDate::from_ymd_opt(2022, 4, 8)
                .unwrap()
                .and_hms_opt(11, 0, 0)
                .unwrap(),
        );
        assert!(is_upcoming(&this_hour, now));
        assert!(!is_upcoming(&last_hour, now));
    }

    #[test]
    fn test_week_guard_compares_weeks_not_dates() {
        // Selection built from Sunday, "now" on the Friday of the same week.
        let selection = period_for(Granularity::Week, noon(2022, 4, 3));
        assert!(is_upcoming(&selection, noon(2022, 4, 8)));
        // One week earlier is navigable.
        let previous = period_for(Granularity::Week, noon(2022, 3, 27));
        assert!(!is_upcoming(&previous, noon(2022, 4, 8)));
        // Once now rolls into the next week, the old selection unblocks.
        assert!(!is_upcoming(&selection, noon(2022, 4, 10)));
    }

    #[test]
    fn test_week_guard_across_year_boundary() {
        let selection = period_for(Granularity::Week, noon(2021, 12, 30));
        assert!(is_upcoming(&selection, noon(2022, 1, 1)));
        assert!(!is_upcoming(&selection, noon(2022, 1, 2)));
    }

    #[test]
    fn test_month_guard() {
        let now = noon(2022, 4, 8);
        let april = period_for(Granularity::Month, now);
        let march = period_for(Granularity::Month, noon(2022, 3, 15));
        assert!(is_upcoming(&april, now));
        assert!(!is_upcoming(&march, now));
    }

    #[test]
    fn test_trailing_window_guards_anchor_on_last_month() {
        let now = noon(2022, 4, 8);
        let current_half = period_for(Granularity::HalfYear, now);
        let previous_half = period_for(Granularity::HalfYear, noon(2022, 3, 15));
        assert!(is_upcoming(&current_half, now));
        assert!(!is_upcoming(&previous_half, now));

        let current_year = period_for(Granularity::Year, now);
        let previous_year = period_for(Granularity::Year, noon(2022, 3, 15));
        assert!(is_upcoming(&current_year, now));
        assert!(!is_upcoming(&previous_year, now));
    }

    #[test]
    fn test_month_guard_across_year_boundary() {
        let now = noon(2022, 1, 5);
        let december = period_for(Granularity::Month, noon(2021, 12, 15));
        let january = period_for(Granularity::Month, now);
        assert!(!is_upcoming(&december, now));
        assert!(is_upcoming(&january, now));
    }
}
