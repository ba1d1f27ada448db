//! Chart axis labels
//!
//! The horizontal axis carries four gridline labels: the rounded chart
//! ceiling, two thirds, one third and zero. The ceiling is the raw maximum
//! rounded up to a whole number and then bumped in steps of 100 until it
//! divides by 3, keeping every gridline value whole.

use crate::period::Granularity;
use crate::rollup::bucket::Bucket;

/// Chart ceiling: `raw_max` rounded up until it divides evenly by 3
pub fn round_for_thirds(raw_max: f64) -> f64 {
    if !raw_max.is_finite() || raw_max <= 0.0 {
        return 0.0;
    }
    // Chart maxima are intake totals; the clamp keeps the integer math exact.
    let mut ceiling = raw_max.min(1.0e12).ceil() as i64;
    while ceiling % 3 != 0 {
        ceiling += 100;
    }
    ceiling as f64
}

/// Gridline labels from ceiling down to zero, thousands grouped
pub fn horizontal_axis_labels(raw_max: f64) -> Vec<String> {
    let top = round_for_thirds(raw_max);
    let third = top / 3.0;
    vec![
        group_thousands(top),
        group_thousands(third * 2.0),
        group_thousands(third),
        group_thousands(0.0),
    ]
}

/// Formats a value with comma thousands grouping and at most two fraction
/// digits, "7800" becoming "7,800"
pub fn group_thousands(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let mut out = String::new();
    if negative && (whole > 0 || fraction > 0) {
        out.push('-');
    }
    out.push_str(&grouped);
    if fraction > 0 {
        if fraction % 10 == 0 {
            out.push_str(&format!(".{}", fraction / 10));
        } else {
            out.push_str(&format!(".{fraction:02}"));
        }
    }
    out
}

/// Labels along the bucket axis, one style per granularity
pub fn vertical_axis_labels(buckets: &[Bucket], granularity: Granularity) -> Vec<String> {
    match granularity {
        Granularity::Hour | Granularity::Day => vec![
            "12A".to_string(),
            "6A".to_string(),
            "12P".to_string(),
            "6P".to_string(),
        ],
        Granularity::Week => vec![
            "S".to_string(),
            "M".to_string(),
            "T".to_string(),
            "W".to_string(),
            "T".to_string(),
            "F".to_string(),
            "S".to_string(),
        ],
        Granularity::Month => month_day_labels(buckets.len()),
        Granularity::HalfYear | Granularity::Year => {
            let mut labels: Vec<String> = buckets
                .iter()
                .map(|bucket| bucket.at.format("%b").to_string())
                .collect();
            labels.dedup();
            labels
        }
    }
}

fn month_day_labels(day_count: usize) -> Vec<String> {
    let marks: [usize; 5] = match day_count {
        28 => [1, 8, 15, 22, 28],
        29 => [1, 8, 15, 22, 29],
        30 => [1, 8, 15, 22, 30],
        31 => [1, 8, 15, 22, 31],
        // Months only come in the four sizes above; keep the shape anyway.
        other => [1, 8, 15, 22, other],
    };
    marks.iter().map(|mark| mark.to_string()).collect()
}
