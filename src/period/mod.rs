//! Calendar periods
//!
//! A `Period` is a fully materialized span of calendar time at one of six
//! granularities. Construction and stepping live in `builder`, the
//! now-relative guard in `navigation`. Day-level periods carry their actual
//! member dates so week/month boundary quirks are resolved once, up front.

pub mod builder;
pub mod navigation;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Granularity of a calendar period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Hour,
    Day,
    Week,
    Month,
    HalfYear,
    Year,
}

impl Default for Granularity {
    fn default() -> Self {
        Granularity::Day
    }
}

impl From<&str> for Granularity {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "hour" => Granularity::Hour,
            "week" => Granularity::Week,
            "month" => Granularity::Month,
            "halfyear" | "half_year" | "half-year" => Granularity::HalfYear,
            "year" => Granularity::Year,
            _ => Granularity::Day,
        }
    }
}

/// A materialized calendar period
///
/// Weeks run Sunday through Saturday. A half-year holds the calendar weeks
/// overlapping its six trailing months, with the first and last week clipped
/// to the half-year bounds. A year holds the first day of each of its twelve
/// trailing months.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Period {
    /// A single clock hour of one day
    Hour { anchor: NaiveDateTime },
    /// A single calendar day
    Day { anchor: NaiveDate },
    /// Seven days, Sunday first
    Week { days: Vec<NaiveDate> },
    /// Every day of one calendar month
    Month { days: Vec<NaiveDate> },
    /// Clipped weeks covering six trailing calendar months
    HalfYear { weeks: Vec<Vec<NaiveDate>> },
    /// First day of each of twelve trailing calendar months
    Year { months: Vec<NaiveDate> },
}

impl Period {
    pub fn granularity(&self) -> Granularity {
        match self {
            Period::Hour { .. } => Granularity::Hour,
            Period::Day { .. } => Granularity::Day,
            Period::Week { .. } => Granularity::Week,
            Period::Month { .. } => Granularity::Month,
            Period::HalfYear { .. } => Granularity::HalfYear,
            Period::Year { .. } => Granularity::Year,
        }
    }

    /// First calendar day covered by this period
    pub fn first_date(&self) -> NaiveDate {
        match self {
            Period::Hour { anchor } => anchor.date(),
            Period::Day { anchor } => *anchor,
            Period::Week { days } | Period::Month { days } => {
                days.first().copied().unwrap_or_default()
            }
            Period::HalfYear { weeks } => weeks
                .first()
                .and_then(|week| week.first())
                .copied()
                .unwrap_or_default(),
            Period::Year { months } => months.first().copied().unwrap_or_default(),
        }
    }

    /// Last calendar day covered by this period
    pub fn last_date(&self) -> NaiveDate {
        match self {
            Period::Hour { anchor } => anchor.date(),
            Period::Day { anchor } => *anchor,
            Period::Week { days } | Period::Month { days } => {
                days.last().copied().unwrap_or_default()
            }
            Period::HalfYear { weeks } => weeks
                .last()
                .and_then(|week| week.last())
                .copied()
                .unwrap_or_default(),
            Period::Year { months } => {
                let first = months.last().copied().unwrap_or_default();
                builder::month_end_of(first)
            }
        }
    }

    /// Whether an instant falls inside this period, compared at the
    /// period's own granularity
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        let date = at.date();
        match self {
            Period::Hour { anchor } => {
                anchor.date() == date && anchor.hour() == at.hour()
            }
            Period::Day { anchor } => *anchor == date,
            Period::Week { days } | Period::Month { days } => days.contains(&date),
            Period::HalfYear { weeks } => weeks.iter().any(|week| week.contains(&date)),
            Period::Year { months } => months
                .iter()
                .any(|m| m.year() == date.year() && m.month() == date.month()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_granularity_from_str() {
        assert_eq!(Granularity::from("hour"), Granularity::Hour);
        assert_eq!(Granularity::from("Week"), Granularity::Week);
        assert_eq!(Granularity::from("halfyear"), Granularity::HalfYear);
        assert_eq!(Granularity::from("half_year"), Granularity::HalfYear);
        assert_eq!(Granularity::from("garbage"), Granularity::Day);
    }

    #[test]
    fn test_granularity_serde_labels() {
        assert_eq!(
            serde_json::to_string(&Granularity::HalfYear).unwrap(),
            "\"halfyear\""
        );
        assert_eq!(serde_json::to_string(&Granularity::Day).unwrap(), "\"day\"");
    }

    #[test]
    fn test_day_contains_only_its_date() {
        let day = Period::Day {
            anchor: date(2022, 4, 8),
        };
        assert!(day.contains(date(2022, 4, 8).and_hms_opt(0, 0, 0).unwrap()));
        assert!(day.contains(date(2022, 4, 8).and_hms_opt(23, 59, 59).unwrap()));
        assert!(!day.contains(date(2022, 4, 9).and_hms_opt(0, 0, 0).unwrap()));
    }

    #[test]
    fn test_hour_contains_compares_date_and_hour() {
        let hour = Period::Hour {
            anchor: date(2022, 4, 8).and_hms_opt(15, 30, 0).unwrap(),
        };
        assert!(hour.contains(date(2022, 4, 8).and_hms_opt(15, 0, 0).unwrap()));
        assert!(hour.contains(date(2022, 4, 8).and_hms_opt(15, 59, 59).unwrap()));
        assert!(!hour.contains(date(2022, 4, 8).and_hms_opt(16, 0, 0).unwrap()));
        assert!(!hour.contains(date(2022, 4, 9).and_hms_opt(15, 0, 0).unwrap()));
    }

    #[test]
    fn test_year_contains_matches_on_month() {
        let year = Period::Year {
            months: vec![date(2021, 5, 1), date(2021, 6, 1)],
        };
        assert!(year.contains(date(2021, 5, 31).and_hms_opt(12, 0, 0).unwrap()));
        assert!(!year.contains(date(2021, 7, 1).and_hms_opt(12, 0, 0).unwrap()));
    }
}
