//! Chart buckets
//!
//! A period splits into ordered buckets: 24 hour slots for an hour or day
//! selection, one slot per day for weeks and months, one per clipped week
//! for half-years, one per month for years. A bucket that matched no
//! entries carries `None`, which is not the same as entries summing to
//! zero.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::models::{CategoryFilter, Entry};
use crate::period::builder::{at_midnight, month_end_of};
use crate::period::Period;
use crate::store::EventSource;

/// One chart slot of a period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    /// Start of the slot
    pub at: NaiveDateTime,
    /// Number of calendar days the slot spans
    pub day_span: u32,
    /// Filter the entries were matched against
    pub filter: CategoryFilter,
    /// Matching entries, `None` when the slot has no data
    pub entries: Option<Vec<Entry>>,
}

impl Bucket {
    fn new(
        at: NaiveDateTime,
        day_span: u32,
        filter: CategoryFilter,
        entries: Vec<Entry>,
    ) -> Self {
        let entries = if entries.is_empty() {
            None
        } else {
            Some(entries)
        };
        Self {
            at,
            day_span,
            filter,
            entries,
        }
    }

    pub fn has_data(&self) -> bool {
        self.entries.is_some()
    }

    /// Sum of entry amounts, 0 for a slot with no data
    pub fn total(&self) -> f64 {
        match &self.entries {
            Some(entries) => entries.iter().map(|e| e.amount).sum(),
            None => 0.0,
        }
    }

    /// Largest single entry amount, 0 for a slot with no data
    pub fn max(&self) -> f64 {
        match &self.entries {
            Some(entries) => entries.iter().map(|e| e.amount).fold(0.0, f64::max),
            None => 0.0,
        }
    }

    /// Smallest single entry amount, 0 for a slot with no data
    pub fn min(&self) -> f64 {
        match &self.entries {
            Some(entries) => {
                let min = entries.iter().map(|e| e.amount).fold(f64::INFINITY, f64::min);
                if min.is_finite() {
                    min
                } else {
                    0.0
                }
            }
            None => 0.0,
        }
    }
}

/// Splits a period into its chart buckets, filtering entries by category
/// scope and enabled state
pub fn buckets_for<S: EventSource>(
    source: &S,
    period: &Period,
    filter: CategoryFilter,
) -> Vec<Bucket> {
    match period {
        Period::Hour { anchor } => hour_buckets(source, anchor.date(), filter),
        Period::Day { anchor } => hour_buckets(source, *anchor, filter),
        Period::Week { days } | Period::Month { days } => day_buckets(source, days, filter),
        Period::HalfYear { weeks } => week_buckets(source, weeks, filter),
        Period::Year { months } => month_buckets(source, months, filter),
    }
}

fn matching<S, F>(source: &S, filter: CategoryFilter, keep: F) -> Vec<Entry>
where
    S: EventSource,
    F: Fn(&Entry) -> bool,
{
    let mut matches = Vec::new();
    for entry in source.entries() {
        if source.is_enabled(entry.category) && filter.matches(entry.category) && keep(entry) {
            matches.push(entry.clone());
        }
    }
    matches
}

fn hour_buckets<S: EventSource>(
    source: &S,
    day: NaiveDate,
    filter: CategoryFilter,
) -> Vec<Bucket> {
    (0..24)
        .map(|hour| {
            let slot = day.and_hms_opt(hour, 0, 0).unwrap_or_else(|| at_midnight(day));
            let entries = matching(source, filter, |e| {
                e.at.date() == day && e.at.hour() == hour
            });
            Bucket::new(slot, 1, filter, entries)
        })
        .collect()
}

fn day_buckets<S: EventSource>(
    source: &S,
    days: &[NaiveDate],
    filter: CategoryFilter,
) -> Vec<Bucket> {
    days.iter()
        .map(|&day| {
            let entries = matching(source, filter, |e| e.at.date() == day);
            Bucket::new(at_midnight(day), 1, filter, entries)
        })
        .collect()
}

fn week_buckets<S: EventSource>(
    source: &S,
    weeks: &[Vec<NaiveDate>],
    filter: CategoryFilter,
) -> Vec<Bucket> {
    weeks
        .iter()
        .filter_map(|week| {
            let first = week.first()?;
            let entries = matching(source, filter, |e| week.contains(&e.at.date()));
            Some(Bucket::new(
                at_midnight(*first),
                week.len() as u32,
                filter,
                entries,
            ))
        })
        .collect()
}

fn month_buckets<S: EventSource>(
    source: &S,
    months: &[NaiveDate],
    filter: CategoryFilter,
) -> Vec<Bucket> {
    months
        .iter()
        .map(|&month| {
            let entries = matching(source, filter, |e| {
                e.at.year() == month.year() && e.at.month() == month.month()
            });
            Bucket::new(at_midnight(month), month_end_of(month).day(), filter, entries)
        })
        .collect()
}
