//! Period descriptions
//!
//! Three families of strings per period:
//! - `describe`: the compact header form, "Apr 3-9, 2022"
//! - `describe_accessible`: the spoken form, "Apr 3rd to 9th, 2022",
//!   with "Today"/"Yesterday"/"Tomorrow" for day periods near the clock
//! - `narrate`: the chart summary sentence read by screen readers

use chrono::{Datelike, NaiveDate, Timelike};

use crate::period::Period;

/// Compact display description of a period
pub fn describe(period: &Period) -> String {
    match period {
        Period::Hour { anchor } => format!(
            "{}, {}",
            day_form(anchor.date()),
            hour_range_label(anchor.hour())
        ),
        Period::Day { anchor } => day_form(*anchor),
        Period::Week { days } => {
            let first = days.first().copied().unwrap_or_default();
            let last = days.last().copied().unwrap_or_default();
            day_range(first, last)
        }
        Period::Month { days } => {
            let first = days.first().copied().unwrap_or_default();
            format!("{} {}", month_abbr(first), first.year())
        }
        Period::HalfYear { .. } | Period::Year { .. } => {
            month_range(period.first_date(), period.last_date())
        }
    }
}

/// Spoken description of a period, suited to screen readers
///
/// Day periods adjacent to `today` read as "Today", "Yesterday" or
/// "Tomorrow"; ranges spell out ordinals and swap "-" for "to".
pub fn describe_accessible(period: &Period, today: NaiveDate) -> String {
    match period {
        Period::Hour { anchor } => format!(
            "{}, {}",
            relative_day_name(anchor.date(), today),
            hour_range_label(anchor.hour())
        ),
        Period::Day { anchor } => relative_day_name(*anchor, today),
        Period::Week { days } => {
            let first = days.first().copied().unwrap_or_default();
            let last = days.last().copied().unwrap_or_default();
            spoken_day_range(first, last)
        }
        Period::Month { days } => {
            let first = days.first().copied().unwrap_or_default();
            format!("{} {}", month_full(first), first.year())
        }
        Period::HalfYear { .. } | Period::Year { .. } => {
            spoken_month_range(period.first_date(), period.last_date())
        }
    }
}

/// Summary sentence for the whole chart
///
/// `category` is `None` for the combined total view.
pub fn narrate(period: &Period, category: Option<&str>, today: NaiveDate) -> String {
    let subject = match category {
        Some(name) => format!("your {name} intake"),
        None => "your intake".to_string(),
    };
    let tail = match period {
        Period::Day { anchor } => day_tail(*anchor, today),
        _ => format!("from {}.", describe_accessible(period, today)),
    };
    format!("Data representing {subject} {tail}")
}

/// English ordinal suffix for a day of month
pub fn ordinal_suffix(day: u32) -> &'static str {
    match day % 100 {
        11 | 12 | 13 => "th",
        _ => match day % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    }
}

/// Label for a clock-hour slot, "3 to 4 PM"
///
/// Noon and midnight keep the shared meridiem on the right-hand side:
/// "12 to 1 AM", "11 AM to 12 PM", "12 to 1 PM", "11 PM to 12 AM".
pub fn hour_range_label(hour: u32) -> String {
    let hour = hour % 24;
    if hour == 0 {
        "12 to 1 AM".to_string()
    } else if hour < 11 {
        format!("{} to {} AM", hour, hour + 1)
    } else if hour == 11 {
        "11 AM to 12 PM".to_string()
    } else if hour == 12 {
        "12 to 1 PM".to_string()
    } else if hour < 23 {
        format!("{} to {} PM", hour - 12, hour - 11)
    } else {
        "11 PM to 12 AM".to_string()
    }
}

// ============================================================
// Helpers
// ============================================================

fn month_abbr(date: NaiveDate) -> String {
    date.format("%b").to_string()
}

fn month_full(date: NaiveDate) -> String {
    date.format("%B").to_string()
}

fn day_form(date: NaiveDate) -> String {
    format!("{} {}, {}", month_abbr(date), date.day(), date.year())
}

fn ordinal_day(day: u32) -> String {
    format!("{}{}", day, ordinal_suffix(day))
}

fn relative_day_name(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        "Today".to_string()
    } else if Some(date) == today.pred_opt() {
        "Yesterday".to_string()
    } else if Some(date) == today.succ_opt() {
        "Tomorrow".to_string()
    } else {
        day_form(date)
    }
}

fn day_tail(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        "Today.".to_string()
    } else {
        format!(
            "on {} {}, {}.",
            month_abbr(date),
            ordinal_day(date.day()),
            date.year()
        )
    }
}

fn day_range(first: NaiveDate, last: NaiveDate) -> String {
    if first.year() == last.year() && first.month() == last.month() {
        format!(
            "{} {}-{}, {}",
            month_abbr(first),
            first.day(),
            last.day(),
            first.year()
        )
    } else if first.year() == last.year() {
        format!(
            "{} {} - {} {}, {}",
            month_abbr(first),
            first.day(),
            month_abbr(last),
            last.day(),
            first.year()
        )
    } else {
        format!(
            "{} {}, {} - {} {}, {}",
            month_abbr(first),
            first.day(),
            first.year(),
            month_abbr(last),
            last.day(),
            last.year()
        )
    }
}

fn spoken_day_range(first: NaiveDate, last: NaiveDate) -> String {
    if first.year() == last.year() && first.month() == last.month() {
        format!(
            "{} {} to {}, {}",
            month_abbr(first),
            ordinal_day(first.day()),
            ordinal_day(last.day()),
            first.year()
        )
    } else if first.year() == last.year() {
        format!(
            "{} {} to {} {}, {}",
            month_abbr(first),
            ordinal_day(first.day()),
            month_abbr(last),
            ordinal_day(last.day()),
            first.year()
        )
    } else {
        format!(
            "{} {}, {} to {} {}, {}",
            month_abbr(first),
            ordinal_day(first.day()),
            first.year(),
            month_abbr(last),
            ordinal_day(last.day()),
            last.year()
        )
    }
}

fn month_range(first: NaiveDate, last: NaiveDate) -> String {
    if first.year() == last.year() {
        format!("{} - {} {}", month_abbr(first), month_abbr(last), first.year())
    } else {
        format!(
            "{} {} - {} {}",
            month_abbr(first),
            first.year(),
            month_abbr(last),
            last.year()
        )
    }
}

fn spoken_month_range(first: NaiveDate, last: NaiveDate) -> String {
    if first.year() == last.year() {
        format!("{} to {} {}", month_abbr(first), month_abbr(last), first.year())
    } else {
        format!(
            "{} {} to {} {}",
            month_abbr(first),
            first.year(),
            month_abbr(last),
            last.year()
        )
    }
}
