use crate::core::ProcessedPoint;

/// Tolerance in hundredths so values already on the grid stay put.
const GRID_EPSILON: f64 = 1e-9;

/// Y range used when nothing is selected or there is nothing to show.
pub const DEFAULT_Y_DOMAIN: (f64, f64) = (0.0, 10.0);

/// Share of the value span added above and below the data.
pub const Y_DOMAIN_PADDING_RATIO: f64 = 0.1;

/// Padded Y range covering the selected series of `points`.
///
/// Only series listed in `selected` are scanned. The lower bound never goes
/// below zero. The lower bound is rounded down and the upper bound up to two
/// decimals, so rounding never cuts into the data range.
#[must_use]
pub fn y_axis_domain<S: AsRef<str>>(points: &[ProcessedPoint], selected: &[S]) -> (f64, f64) {
    if points.is_empty() || selected.is_empty() {
        return DEFAULT_Y_DOMAIN;
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for point in points {
        for key in selected {
            if let Some(value) = point.value(key.as_ref()) {
                min = min.min(value);
                max = max.max(value);
            }
        }
    }

    if !min.is_finite() || !max.is_finite() {
        return DEFAULT_Y_DOMAIN;
    }

    let padding = (max - min) * Y_DOMAIN_PADDING_RATIO;
    let mut lower = floor2(min - padding);
    if lower > min {
        lower = floor2(lower - 0.01);
    }
    let mut upper = ceil2(max + padding);
    if upper < max {
        upper = ceil2(upper + 0.01);
    }
    (lower.max(0.0), upper)
}

fn floor2(value: f64) -> f64 {
    (value * 100.0 + GRID_EPSILON).floor() / 100.0
}

fn ceil2(value: f64) -> f64 {
    (value * 100.0 - GRID_EPSILON).ceil() / 100.0
}
