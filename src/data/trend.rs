//! Trend helpers for sparklines and day-over-day changes.

use super::reading::Metric;
use super::series::Series;

/// Number of sparkline bar levels.
pub const SPARKLINE_LEVELS: u8 = 8;

/// Normalize the last `width` values of a metric to 0-7 for sparkline display.
///
/// Returns an empty Vec if there are fewer than two values.
pub fn sparkline(series: &Series, metric: Metric, width: usize) -> Vec<u8> {
    let values = series.values(metric);
    let start = values.len().saturating_sub(width);
    normalize(&values[start..])
}

fn normalize(values: &[f64]) -> Vec<u8> {
    if values.len() < 2 {
        return Vec::new();
    }

    let max = values.iter().copied().fold(f64::MIN, f64::max);
    let min = values.iter().copied().fold(f64::MAX, f64::min);
    let range = max - min;
    let top = f64::from(SPARKLINE_LEVELS - 1);

    values
        .iter()
        .map(|&v| {
            if range <= f64::EPSILON {
                // Flat line sits mid-height
                (top / 2.0) as u8
            } else {
                (((v - min) / range) * top).round().clamp(0.0, top) as u8
            }
        })
        .collect()
}

/// Change between the last two values of a metric.
///
/// Returns None if there's not enough history.
pub fn latest_change(series: &Series, metric: Metric) -> Option<f64> {
    let values = series.values(metric);
    let [.., previous, current] = values.as_slice() else {
        return None;
    };
    Some(current - previous)
}
