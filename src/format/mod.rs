//! Display formatting
//!
//! Period descriptions, spoken variants for screen readers, chart
//! narration, and axis label math. Strings are computed on demand from the
//! period itself; periods never cache their own names.

pub mod axis;
pub mod describe;

pub use axis::{group_thousands, horizontal_axis_labels, round_for_thirds, vertical_axis_labels};
pub use describe::{describe, describe_accessible, hour_range_label, narrate, ordinal_suffix};
