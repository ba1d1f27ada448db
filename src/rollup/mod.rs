//! Rollup engine
//!
//! Splits a period into ordered chart buckets and computes the scalar
//! rollups the dashboard shows: totals, goal progress, maxima and averages.
//! Everything is computed on demand from an `EventSource`; nothing is
//! cached between queries.

pub mod bucket;
pub mod engine;

pub use bucket::{buckets_for, Bucket};
pub use engine::{
    average_across, daily_average, entries_in, max_value, percent_of_goal, total,
    trailing_average,
};
