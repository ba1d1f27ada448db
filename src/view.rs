//! Dashboard view assembly
//!
//! `Selection` tracks which period the user is looking at and enforces the
//! forward guard. `chart_view` assembles the serializable snapshot a chart
//! draws from: bars, axis labels, descriptions and the scalar rollups.

use chrono::{Datelike, Duration, NaiveDateTime, Timelike};
use serde::Serialize;
use tracing::debug;

use crate::format::axis::{horizontal_axis_labels, round_for_thirds, vertical_axis_labels};
use crate::format::describe::{describe, describe_accessible, hour_range_label, narrate};
use crate::models::CategoryFilter;
use crate::period::builder::{advance, period_for};
use crate::period::navigation::is_upcoming;
use crate::period::{Granularity, Period};
use crate::rollup::bucket::{buckets_for, Bucket};
use crate::rollup::engine;
use crate::store::EventSource;

/// The period currently on screen
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    period: Period,
}

impl Selection {
    /// Starts at the current period of the given granularity
    pub fn new(granularity: Granularity, now: NaiveDateTime) -> Self {
        Self {
            period: period_for(granularity, now),
        }
    }

    pub fn period(&self) -> &Period {
        &self.period
    }

    pub fn granularity(&self) -> Granularity {
        self.period.granularity()
    }

    /// Re-anchors the selection, switching granularity if asked to
    pub fn jump_to(&mut self, granularity: Granularity, instant: NaiveDateTime) {
        self.period = period_for(granularity, instant);
    }

    /// Steps back one unit; reports whether the selection moved
    pub fn backward(&mut self) -> bool {
        let previous = advance(&self.period, -1);
        let moved = previous != self.period;
        self.period = previous;
        moved
    }

    /// Steps forward one unit unless the next period has not begun yet;
    /// reports whether the selection moved
    pub fn forward(&mut self, now: NaiveDateTime) -> bool {
        if is_upcoming(&self.period, now) {
            return false;
        }
        let next = advance(&self.period, 1);
        let moved = next != self.period;
        self.period = next;
        moved
    }
}

/// One chart bar
#[derive(Debug, Clone, Serialize)]
pub struct BucketView {
    /// Short slot label, "3 to 4 PM" or "Apr 3"
    pub label: String,
    /// Slot total in the user's units
    pub value: f64,
    /// Bar height as a fraction of the axis ceiling, clamped to 1
    pub normalized: f64,
    /// False when the slot had no entries at all
    pub has_data: bool,
}

/// Everything a chart needs to draw one period
#[derive(Debug, Clone, Serialize)]
pub struct ChartView {
    pub granularity: Granularity,
    pub description: String,
    pub accessible_description: String,
    pub narration: String,
    pub buckets: Vec<BucketView>,
    pub horizontal_axis: Vec<String>,
    pub vertical_axis: Vec<String>,
    pub total: f64,
    pub goal_percent: f64,
    pub period_average: f64,
    pub daily_average: f64,
    pub trailing_average: Option<f64>,
    pub chart_max: f64,
}

/// Assembles the chart snapshot for the selected period
///
/// `category_name` feeds the narration and is `None` for the combined
/// total view.
pub fn chart_view<S: EventSource>(
    source: &S,
    selection: &Selection,
    filter: CategoryFilter,
    category_name: Option<&str>,
    goal: f64,
    now: NaiveDateTime,
) -> ChartView {
    let period = selection.period();
    let granularity = selection.granularity();
    let today = now.date();
    let buckets = buckets_for(source, period, filter);
    let chart_max = engine::max_value(&buckets, granularity);
    let ceiling = round_for_thirds(chart_max);
    debug!(
        "Assembled {:?} chart with {} buckets",
        granularity,
        buckets.len()
    );
    ChartView {
        granularity,
        description: describe(period),
        accessible_description: describe_accessible(period, today),
        narration: narrate(period, category_name, today),
        buckets: buckets
            .iter()
            .map(|bucket| bucket_view(bucket, granularity, ceiling))
            .collect(),
        horizontal_axis: horizontal_axis_labels(chart_max),
        vertical_axis: vertical_axis_labels(&buckets, granularity),
        total: engine::total(source, period, filter),
        goal_percent: engine::percent_of_goal(source, period, filter, goal),
        period_average: engine::average_across(&buckets, granularity),
        daily_average: engine::daily_average(&buckets, granularity, None),
        trailing_average: engine::trailing_average(source, filter, now),
        chart_max,
    }
}

fn bucket_view(bucket: &Bucket, granularity: Granularity, ceiling: f64) -> BucketView {
    let value = bucket.total();
    let normalized = if ceiling > 0.0 {
        (value / ceiling).min(1.0)
    } else {
        0.0
    };
    BucketView {
        label: bucket_label(bucket, granularity),
        value,
        normalized,
        has_data: bucket.has_data(),
    }
}

fn bucket_label(bucket: &Bucket, granularity: Granularity) -> String {
    match granularity {
        Granularity::Hour | Granularity::Day => hour_range_label(bucket.at.hour()),
        Granularity::Week | Granularity::Month => {
            format!("{} {}", bucket.at.format("%b"), bucket.at.day())
        }
        Granularity::HalfYear => {
            let first = bucket.at.date();
            let span = i64::from(bucket.day_span.saturating_sub(1));
            let last = first
                .checked_add_signed(Duration::days(span))
                .unwrap_or(first);
            if first.month() == last.month() {
                format!("{} {}-{}", first.format("%b"), first.day(), last.day())
            } else {
                format!(
                    "{} {} - {} {}",
                    first.format("%b"),
                    first.day(),
                    last.format("%b"),
                    last.day()
                )
            }
        }
        Granularity::Year => bucket.at.format("%b").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Store;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn seeded_store() -> (Store, crate::models::CategoryId) {
        let mut store = Store::with_defaults();
        let water = store.category_by_name("Water").unwrap().id;
        (store, water)
    }

    #[test]
    fn test_selection_starts_at_the_current_period() {
        let now = at(2022, 4, 8, 12);
        let selection = Selection::new(Granularity::Week, now);
        assert_eq!(selection.granularity(), Granularity::Week);
        assert!(selection.period().contains(now));
    }

    #[test]
    fn test_forward_is_blocked_on_the_current_period() {
        let now = at(2022, 4, 8, 12);
        let mut selection = Selection::new(Granularity::Week, now);
        assert!(!selection.forward(now));
        assert!(selection.period().contains(now));
    }

    #[test]
    fn test_backward_then_forward_round_trips() {
        let now = at(2022, 4, 8, 12);
        let mut selection = Selection::new(Granularity::Month, now);
        let start = selection.period().clone();
        assert!(selection.backward());
        assert_ne!(selection.period(), &start);
        assert!(selection.forward(now));
        assert_eq!(selection.period(), &start);
        assert!(!selection.forward(now));
    }

    #[test]
    fn test_jump_to_switches_granularity() {
        let now = at(2022, 4, 8, 12);
        let mut selection = Selection::new(Granularity::Day, now);
        selection.jump_to(Granularity::Year, now);
        assert_eq!(selection.granularity(), Granularity::Year);
        assert_eq!(
            selection.period().first_date(),
            NaiveDate::from_ymd_opt(2021, 5, 1).unwrap()
        );
    }

    #[test]
    fn test_chart_view_for_a_week_of_data() {
        let (mut store, water) = seeded_store();
        let amounts = [100.0, 200.0, 300.0, 400.0, 300.0, 200.0, 100.0];
        for (offset, amount) in amounts.iter().enumerate() {
            store
                .log_entry(water, *amount, at(2022, 4, 3 + offset as u32, 10))
                .unwrap();
        }
        let now = at(2022, 4, 8, 12);
        let selection = Selection::new(Granularity::Week, now);
        let view = chart_view(&store, &selection, CategoryFilter::Total, None, 2000.0, now);

        assert_eq!(view.description, "Apr 3-9, 2022");
        assert_eq!(view.narration, "Data representing your intake from Apr 3rd to 9th, 2022.");
        assert_eq!(view.buckets.len(), 7);
        assert_eq!(view.total, 1600.0);
        assert_eq!(view.chart_max, 400.0);
        assert_eq!(view.horizontal_axis, vec!["600", "400", "200", "0"]);
        assert_eq!(view.vertical_axis.len(), 7);
        assert!((view.period_average - 1600.0 / 7.0).abs() < 1e-9);
        assert_eq!(view.daily_average, 0.0);
        assert_eq!(view.trailing_average, None);
        for bucket in &view.buckets {
            assert!(bucket.normalized >= 0.0 && bucket.normalized <= 1.0);
        }
        // Wednesday holds the peak: 400 of a 600 ceiling.
        assert!((view.buckets[3].normalized - 400.0 / 600.0).abs() < 1e-9);
    }

    #[test]
    fn test_chart_view_for_a_single_category() {
        let (mut store, water) = seeded_store();
        let coffee = store.category_by_name("Coffee").unwrap().id;
        store.log_entry(water, 500.0, at(2022, 4, 8, 9)).unwrap();
        store.log_entry(coffee, 120.0, at(2022, 4, 8, 9)).unwrap();
        let now = at(2022, 4, 8, 12);
        let selection = Selection::new(Granularity::Day, now);
        let view = chart_view(
            &store,
            &selection,
            CategoryFilter::Only(coffee),
            Some("Coffee"),
            2000.0,
            now,
        );
        assert_eq!(view.total, 120.0);
        assert_eq!(view.narration, "Data representing your Coffee intake Today.");
        assert_eq!(view.goal_percent, 120.0 / 2000.0);
        assert_eq!(view.buckets.len(), 24);
        assert_eq!(view.buckets[9].label, "9 to 10 AM");
        assert!(view.buckets[9].has_data);
        assert!(!view.buckets[10].has_data);
    }

    #[test]
    fn test_chart_view_serializes() {
        let (store, _) = seeded_store();
        let now = at(2022, 4, 8, 12);
        let selection = Selection::new(Granularity::Day, now);
        let view = chart_view(&store, &selection, CategoryFilter::Total, None, 2000.0, now);
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["granularity"], "day");
        assert_eq!(json["description"], "Apr 8, 2022");
        assert_eq!(json["buckets"].as_array().unwrap().len(), 24);
    }
}
