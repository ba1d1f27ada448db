//! Waterline core library
//!
//! Calendar-period rollup engine for timestamped intake entries:
//! - Category and entry models with serde support
//! - Period construction and navigation across six granularities
//! - Bucketed rollups (totals, averages, maxima, goal progress)
//! - Display formatting for period descriptions and chart axes
//! - In-memory store with category management and user settings

pub mod clock;
pub mod format;
pub mod models;
pub mod period;
pub mod rollup;
pub mod store;
pub mod view;

pub use clock::{Clock, FixedClock, SystemClock};
pub use models::category::{Category, CategoryFilter, CategoryId};
pub use models::entry::{Entry, EntryId};
pub use period::builder::{advance, period_for};
pub use period::navigation::is_upcoming;
pub use period::{Granularity, Period};
pub use rollup::bucket::{buckets_for, Bucket};
pub use store::settings::{Settings, Units};
pub use store::{EventSource, Store, StoreError};
pub use view::{chart_view, BucketView, ChartView, Selection};
