//! Scalar rollups
//!
//! One engine behind the `EventSource` seam serves both the dashboard total
//! view and the per-category detail views. Degenerate inputs never error:
//! empty data rolls up to 0, and a rollup that needs more history than the
//! source has returns `None`.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::models::{CategoryFilter, Entry};
use crate::period::{Granularity, Period};
use crate::rollup::bucket::Bucket;
use crate::store::EventSource;

/// Entries inside `period` matching the filter, disabled categories excluded
pub fn entries_in<S: EventSource>(
    source: &S,
    period: &Period,
    filter: CategoryFilter,
) -> Vec<Entry> {
    let mut matches = Vec::new();
    for entry in source.entries() {
        if source.is_enabled(entry.category)
            && filter.matches(entry.category)
            && period.contains(entry.at)
        {
            matches.push(entry.clone());
        }
    }
    matches
}

/// Total amount consumed inside `period`
pub fn total<S: EventSource>(source: &S, period: &Period, filter: CategoryFilter) -> f64 {
    entries_in(source, period, filter)
        .iter()
        .map(|e| e.amount)
        .sum()
}

/// Fraction of the daily goal consumed inside `period`
///
/// A non-positive goal yields 0 rather than a division blowup; keeping the
/// goal positive is the settings layer's job.
pub fn percent_of_goal<S: EventSource>(
    source: &S,
    period: &Period,
    filter: CategoryFilter,
    goal: f64,
) -> f64 {
    safe_div(total(source, period, filter), goal)
}

/// Average daily intake over all history strictly before `reference`
///
/// Returns `None` until at least three calendar months separate the
/// earliest entry from `reference`; a short history would dress up a few
/// data points as a trend.
pub fn trailing_average<S: EventSource>(
    source: &S,
    filter: CategoryFilter,
    reference: NaiveDateTime,
) -> Option<f64> {
    let mut earliest: Option<NaiveDateTime> = None;
    let mut sum = 0.0;
    for entry in source.entries() {
        if !source.is_enabled(entry.category)
            || !filter.matches(entry.category)
            || entry.at >= reference
        {
            continue;
        }
        sum += entry.amount;
        earliest = Some(match earliest {
            Some(seen) => seen.min(entry.at),
            None => entry.at,
        });
    }
    let earliest = earliest?;
    if month_index(reference.date()) - month_index(earliest.date()) < 3 {
        return None;
    }
    let days = (reference.date() - earliest.date()).num_days();
    if days <= 0 {
        return None;
    }
    Some(sum / days as f64)
}

/// Chart ceiling for a bucket sequence
///
/// Hour through month charts scale to the largest single entry; half-year
/// and year charts scale to the largest slot total. Bars at the wide
/// granularities are whole-slot sums, so their axis has to cover the sum.
pub fn max_value(buckets: &[Bucket], granularity: Granularity) -> f64 {
    match granularity {
        Granularity::Hour | Granularity::Day | Granularity::Week | Granularity::Month => {
            buckets.iter().map(Bucket::max).fold(0.0, f64::max)
        }
        Granularity::HalfYear | Granularity::Year => {
            buckets.iter().map(Bucket::total).fold(0.0, f64::max)
        }
    }
}

/// Mean slot total across a week or month's buckets
pub fn average_across(buckets: &[Bucket], granularity: Granularity) -> f64 {
    match granularity {
        Granularity::Week | Granularity::Month => {
            let sum: f64 = buckets.iter().map(Bucket::total).sum();
            safe_div(sum, buckets.len() as f64)
        }
        // Other granularities have no per-slot mean; callers get the
        // documented degenerate value.
        Granularity::Hour | Granularity::Day | Granularity::HalfYear | Granularity::Year => 0.0,
    }
}

/// Per-day average for half-year and year charts
///
/// With a selected slot index, averages that slot over its own day span;
/// otherwise averages the whole window over the sum of spans.
pub fn daily_average(
    buckets: &[Bucket],
    granularity: Granularity,
    selected: Option<usize>,
) -> f64 {
    match granularity {
        Granularity::HalfYear | Granularity::Year => match selected {
            Some(index) => match buckets.get(index) {
                Some(bucket) => safe_div(bucket.total(), f64::from(bucket.day_span)),
                None => 0.0,
            },
            None => {
                let sum: f64 = buckets.iter().map(Bucket::total).sum();
                let days: u32 = buckets.iter().map(|b| b.day_span).sum();
                safe_div(sum, f64::from(days))
            }
        },
        // Narrow granularities chart hours or single days; a per-day
        // average says nothing there.
        Granularity::Hour | Granularity::Day | Granularity::Week | Granularity::Month => 0.0,
    }
}

fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

fn month_index(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 12 + i64::from(date.month())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryId;
    use crate::period::builder::period_for;
    use crate::rollup::bucket::buckets_for;
    use uuid::Uuid;

    /// Frozen event list standing in for the store, proving the engine
    /// only needs the `EventSource` seam.
    struct Snapshot {
        entries: Vec<Entry>,
        disabled: Vec<CategoryId>,
    }

    impl Snapshot {
        fn new() -> Self {
            Self {
                entries: Vec::new(),
                disabled: Vec::new(),
            }
        }

        fn log(&mut self, category: CategoryId, amount: f64, at: NaiveDateTime) {
            self.entries.push(Entry::new(category, amount, at));
        }
    }

    impl EventSource for Snapshot {
        fn entries(&self) -> &[Entry] {
            &self.entries
        }

        fn is_enabled(&self, category: CategoryId) -> bool {
            !self.disabled.contains(&category)
        }
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn week_of_april_8() -> Period {
        period_for(Granularity::Week, at(2022, 4, 8, 12))
    }

    #[test]
    fn test_weekly_total() {
        let water = Uuid::new_v4();
        let mut source = Snapshot::new();
        let amounts = [100.0, 200.0, 300.0, 400.0, 300.0, 200.0, 100.0];
        for (offset, amount) in amounts.iter().enumerate() {
            source.log(water, *amount, at(2022, 4, 3 + offset as u32, 10));
        }
        assert_eq!(
            total(&source, &week_of_april_8(), CategoryFilter::Total),
            1600.0
        );
    }

    #[test]
    fn test_total_of_empty_source_is_zero() {
        let source = Snapshot::new();
        assert_eq!(
            total(&source, &week_of_april_8(), CategoryFilter::Total),
            0.0
        );
    }

    #[test]
    fn test_total_decomposes_across_categories() {
        let water = Uuid::new_v4();
        let coffee = Uuid::new_v4();
        let soda = Uuid::new_v4();
        let mut source = Snapshot::new();
        source.log(water, 500.0, at(2022, 4, 4, 9));
        source.log(coffee, 120.0, at(2022, 4, 5, 9));
        source.log(coffee, 80.0, at(2022, 4, 6, 15));
        source.log(soda, 330.0, at(2022, 4, 6, 19));
        source.disabled.push(soda);

        let period = week_of_april_8();
        let water_total = total(&source, &period, CategoryFilter::Only(water));
        let coffee_total = total(&source, &period, CategoryFilter::Only(coffee));
        let grand = total(&source, &period, CategoryFilter::Total);
        assert_eq!(water_total, 500.0);
        assert_eq!(coffee_total, 200.0);
        assert_eq!(grand, water_total + coffee_total); // soda is disabled
    }

    #[test]
    fn test_entries_outside_period_are_ignored() {
        let water = Uuid::new_v4();
        let mut source = Snapshot::new();
        source.log(water, 999.0, at(2022, 4, 2, 23)); // Saturday before
        source.log(water, 250.0, at(2022, 4, 3, 0)); // Sunday, in
        source.log(water, 999.0, at(2022, 4, 10, 0)); // Sunday after
        assert_eq!(
            total(&source, &week_of_april_8(), CategoryFilter::Total),
            250.0
        );
    }

    #[test]
    fn test_percent_of_goal() {
        let water = Uuid::new_v4();
        let mut source = Snapshot::new();
        source.log(water, 500.0, at(2022, 4, 4, 9));
        let period = week_of_april_8();
        assert_eq!(
            percent_of_goal(&source, &period, CategoryFilter::Total, 2000.0),
            0.25
        );
        assert_eq!(
            percent_of_goal(&source, &period, CategoryFilter::Total, 0.0),
            0.0
        );
        assert_eq!(
            percent_of_goal(&source, &period, CategoryFilter::Total, -10.0),
            0.0
        );
    }

    #[test]
    fn test_trailing_average_needs_three_months_of_history() {
        let water = Uuid::new_v4();
        let mut source = Snapshot::new();
        source.log(water, 100.0, at(2022, 2, 10, 9));
        source.log(water, 100.0, at(2022, 3, 10, 9));
        assert_eq!(
            trailing_average(&source, CategoryFilter::Total, at(2022, 4, 5, 12)),
            None
        );
    }

    #[test]
    fn test_trailing_average_divides_by_elapsed_days() {
        let water = Uuid::new_v4();
        let mut source = Snapshot::new();
        source.log(water, 150.0, at(2022, 1, 5, 9)); // earliest
        source.log(water, 200.0, at(2022, 2, 20, 9));
        source.log(water, 100.0, at(2022, 3, 15, 9));
        source.log(water, 999.0, at(2022, 4, 5, 12)); // not strictly before
        let average = trailing_average(&source, CategoryFilter::Total, at(2022, 4, 5, 12));
        assert_eq!(average, Some(450.0 / 90.0)); // Jan 5 to Apr 5 is 90 days
    }

    #[test]
    fn test_trailing_average_of_empty_source() {
        let source = Snapshot::new();
        assert_eq!(
            trailing_average(&source, CategoryFilter::Total, at(2022, 4, 5, 12)),
            None
        );
    }

    #[test]
    fn test_max_value_uses_largest_entry_at_narrow_granularities() {
        let water = Uuid::new_v4();
        let mut source = Snapshot::new();
        source.log(water, 100.0, at(2022, 4, 4, 9));
        source.log(water, 200.0, at(2022, 4, 4, 9));
        source.log(water, 150.0, at(2022, 4, 5, 9));
        let period = week_of_april_8();
        let buckets = buckets_for(&source, &period, CategoryFilter::Total);
        // Monday's slot totals 300, but its largest entry is 200.
        assert_eq!(max_value(&buckets, Granularity::Week), 200.0);
    }

    #[test]
    fn test_max_value_uses_slot_totals_at_wide_granularities() {
        let water = Uuid::new_v4();
        let mut source = Snapshot::new();
        source.log(water, 100.0, at(2022, 4, 4, 9));
        source.log(water, 200.0, at(2022, 4, 4, 9));
        source.log(water, 150.0, at(2021, 12, 5, 9));
        let period = period_for(Granularity::Year, at(2022, 4, 8, 12));
        let buckets = buckets_for(&source, &period, CategoryFilter::Total);
        assert_eq!(max_value(&buckets, Granularity::Year), 300.0);
    }

    #[test]
    fn test_max_value_of_empty_buckets() {
        assert_eq!(max_value(&[], Granularity::Week), 0.0);
        assert_eq!(max_value(&[], Granularity::Year), 0.0);
    }

    #[test]
    fn test_average_across_week() {
        let water = Uuid::new_v4();
        let mut source = Snapshot::new();
        let amounts = [100.0, 200.0, 300.0, 400.0, 300.0, 200.0, 100.0];
        for (offset, amount) in amounts.iter().enumerate() {
            source.log(water, *amount, at(2022, 4, 3 + offset as u32, 10));
        }
        let period = week_of_april_8();
        let buckets = buckets_for(&source, &period, CategoryFilter::Total);
        let average = average_across(&buckets, Granularity::Week);
        assert!((average - 1600.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_average_across_other_granularities_is_zero() {
        let source = Snapshot::new();
        let period = period_for(Granularity::Day, at(2022, 4, 8, 12));
        let buckets = buckets_for(&source, &period, CategoryFilter::Total);
        assert_eq!(average_across(&buckets, Granularity::Day), 0.0);
    }

    #[test]
    fn test_daily_average_over_whole_window() {
        let water = Uuid::new_v4();
        let mut source = Snapshot::new();
        source.log(water, 365.0, at(2021, 6, 10, 9));
        source.log(water, 365.0, at(2022, 2, 10, 9));
        let period = period_for(Granularity::Year, at(2022, 4, 8, 12));
        let buckets = buckets_for(&source, &period, CategoryFilter::Total);
        // May 2021 through April 2022 is 365 days.
        assert!((daily_average(&buckets, Granularity::Year, None) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_daily_average_of_selected_slot() {
        let water = Uuid::new_v4();
        let mut source = Snapshot::new();
        source.log(water, 280.0, at(2022, 2, 10, 9));
        let period = period_for(Granularity::Year, at(2022, 4, 8, 12));
        let buckets = buckets_for(&source, &period, CategoryFilter::Total);
        // February 2022 is index 9 and spans 28 days.
        assert_eq!(daily_average(&buckets, Granularity::Year, Some(9)), 10.0);
        assert_eq!(daily_average(&buckets, Granularity::Year, Some(99)), 0.0);
    }

    #[test]
    fn test_daily_average_at_narrow_granularities_is_zero() {
        let source = Snapshot::new();
        let period = week_of_april_8();
        let buckets = buckets_for(&source, &period, CategoryFilter::Total);
        assert_eq!(daily_average(&buckets, Granularity::Week, None), 0.0);
    }
}
