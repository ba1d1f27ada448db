//! Period construction and stepping
//!
//! All periods are built from a single instant:
//! - Week: the Sunday-through-Saturday week containing the instant
//! - Month: every day of the instant's calendar month
//! - HalfYear: the weeks overlapping the 6 trailing months ending at the
//!   instant's month, first and last week clipped to the half-year bounds
//! - Year: the 12 trailing months ending at the instant's month
//!
//! Stepping past what chrono can represent leaves the period unchanged.

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime};

use crate::period::{Granularity, Period};

/// Builds the period of the given granularity containing `instant`
pub fn period_for(granularity: Granularity, instant: NaiveDateTime) -> Period {
    let date = instant.date();
    match granularity {
        Granularity::Hour => Period::Hour { anchor: instant },
        Granularity::Day => Period::Day { anchor: date },
        Granularity::Week => Period::Week {
            days: week_days(date),
        },
        Granularity::Month => Period::Month {
            days: month_days(date),
        },
        Granularity::HalfYear => Period::HalfYear {
            weeks: half_year_weeks(date),
        },
        Granularity::Year => Period::Year {
            months: trailing_months(date, 12),
        },
    }
}

/// Steps a period one unit forward (positive `step`) or backward (negative)
///
/// Trailing windows (half-year, year) slide by one month. When the target
/// falls outside the representable calendar range the input is returned
/// unchanged; callers wanting to block future navigation consult
/// `navigation::is_upcoming` before stepping.
pub fn advance(period: &Period, step: i32) -> Period {
    if step == 0 {
        return period.clone();
    }
    let forward = step > 0;
    match period {
        Period::Hour { anchor } => {
            let delta = Duration::hours(if forward { 1 } else { -1 });
            match anchor.checked_add_signed(delta) {
                Some(next) => Period::Hour { anchor: next },
                None => period.clone(),
            }
        }
        Period::Day { anchor } => {
            let next = if forward {
                anchor.succ_opt()
            } else {
                anchor.pred_opt()
            };
            match next {
                Some(day) => Period::Day { anchor: day },
                None => period.clone(),
            }
        }
        Period::Week { .. } => {
            let delta = Duration::days(if forward { 7 } else { -7 });
            match period.first_date().checked_add_signed(delta) {
                Some(day) => period_for(Granularity::Week, at_midnight(day)),
                None => period.clone(),
            }
        }
        Period::Month { .. } => {
            match shift_month(month_start_of(period.first_date()), forward) {
                Some(day) => period_for(Granularity::Month, at_midnight(day)),
                None => period.clone(),
            }
        }
        Period::HalfYear { .. } => {
            match shift_month(month_start_of(period.last_date()), forward) {
                Some(day) => period_for(Granularity::HalfYear, at_midnight(day)),
                None => period.clone(),
            }
        }
        Period::Year { .. } => {
            match shift_month(month_start_of(period.last_date()), forward) {
                Some(day) => period_for(Granularity::Year, at_midnight(day)),
                None => period.clone(),
            }
        }
    }
}

// ============================================================
// Calendar helpers
// ============================================================

pub(crate) fn at_midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Most recent Sunday, or `date` itself when it is one
pub(crate) fn sunday_on_or_before(date: NaiveDate) -> NaiveDate {
    let back = date.weekday().num_days_from_sunday() as i64;
    date.checked_sub_signed(Duration::days(back)).unwrap_or(date)
}

pub(crate) fn month_start_of(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub(crate) fn month_end_of(date: NaiveDate) -> NaiveDate {
    month_start_of(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

fn shift_month(month_start: NaiveDate, forward: bool) -> Option<NaiveDate> {
    if forward {
        month_start.checked_add_months(Months::new(1))
    } else {
        month_start.checked_sub_months(Months::new(1))
    }
}

fn week_days(date: NaiveDate) -> Vec<NaiveDate> {
    let start = sunday_on_or_before(date);
    (0..7)
        .filter_map(|offset| start.checked_add_signed(Duration::days(offset)))
        .collect()
}

fn month_days(date: NaiveDate) -> Vec<NaiveDate> {
    let end = month_end_of(date);
    let mut days = Vec::with_capacity(31);
    let mut current = month_start_of(date);
    while current <= end {
        days.push(current);
        match current.succ_opt() {
            Some(next) => current = next,
            None => break,
        }
    }
    days
}

/// First day of each of the `count` calendar months ending at `date`'s month
fn trailing_months(date: NaiveDate, count: u32) -> Vec<NaiveDate> {
    let anchor = month_start_of(date);
    let mut months = Vec::with_capacity(count as usize);
    for back in (0..count).rev() {
        if let Some(month) = anchor.checked_sub_months(Months::new(back)) {
            months.push(month);
        }
    }
    months
}

fn half_year_weeks(date: NaiveDate) -> Vec<Vec<NaiveDate>> {
    let months = trailing_months(date, 6);
    let first_month = match months.first() {
        Some(&month) => month,
        None => return Vec::new(),
    };
    let range_start = first_month;
    let range_end = month_end_of(months.last().copied().unwrap_or(first_month));

    let mut weeks = Vec::new();
    let mut cursor = sunday_on_or_before(range_start);
    while cursor <= range_end {
        // Clipping drops the days outside the half-year and keeps the rest,
        // which only ever trims the first and last week.
        let week: Vec<NaiveDate> = (0..7)
            .filter_map(|offset| cursor.checked_add_signed(Duration::days(offset)))
            .filter(|day| *day >= range_start && *day <= range_end)
            .collect();
        if !week.is_empty() {
            weeks.push(week);
        }
        match cursor.checked_add_signed(Duration::days(7)) {
            Some(next) => cursor = next,
            None => break,
        }
    }
    weeks
}
