use chrono::DateTime;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_X_LABELS: usize = 12;
pub const DEFAULT_MIN_LABEL_SPACING_PX: f64 = 72.0;
pub const GRID_MULTIPLE_TOLERANCE: f64 = 1e-6;

/// Label step for `count` x values under a label-count and spacing budget.
///
/// The step is `ceil(count / budget)` with budget
/// `min(max_labels, plot_width / min_spacing_px)`, so a plot narrower than
/// one label spacing gets a step larger than `count` and only the first and
/// last values keep labels. A zero budget (no plot width) yields `count`.
#[must_use]
pub fn x_label_step(
    count: usize,
    plot_width: f64,
    max_labels: usize,
    min_spacing_px: f64,
) -> usize {
    if count == 0 {
        return 1;
    }

    let spacing_budget =
        if plot_width.is_finite() && min_spacing_px.is_finite() && min_spacing_px > 0.0 {
            plot_width / min_spacing_px
        } else {
            max_labels as f64
        };
    let budget = (max_labels as f64).min(spacing_budget);
    if !(budget > 0.0) {
        return count;
    }

    ((count as f64 / budget).ceil() as usize).max(1)
}

/// Picks which x values get a visible label: every step-th value plus the
/// last value even when it falls off-step.
#[must_use]
pub fn thin_x_labels(
    values: &[f64],
    plot_width: f64,
    max_labels: usize,
    min_spacing_px: f64,
) -> Vec<f64> {
    let Some(&last) = values.last() else {
        return Vec::new();
    };

    let step = x_label_step(values.len(), plot_width, max_labels, min_spacing_px);
    let mut labeled: Vec<f64> = values.iter().copied().step_by(step).collect();
    if (values.len() - 1) % step != 0 {
        labeled.push(last);
    }
    labeled
}

/// One y grid line and whether it carries text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridTick {
    pub value: f64,
    pub labeled: bool,
}

/// Marks grid lines sitting on a multiple of `interval` from `axis_min`.
///
/// Every grid line is kept; a non-positive or non-finite interval only
/// turns all labels off.
#[must_use]
pub fn y_grid_labels(grid_values: &[f64], axis_min: f64, interval: f64) -> Vec<GridTick> {
    let labels_enabled = interval.is_finite() && interval > 0.0;
    grid_values
        .iter()
        .map(|&value| {
            let labeled = labels_enabled && {
                let steps = (value - axis_min) / interval;
                (steps - steps.round()).abs() <= GRID_MULTIPLE_TOLERANCE
            };
            GridTick { value, labeled }
        })
        .collect()
}

/// Formats an epoch-milliseconds x value as a `YYYY-MM-DD` UTC date.
#[must_use]
pub fn format_time_label(millis: f64) -> Option<String> {
    if !millis.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis(millis.round() as i64)
        .map(|time| time.format("%Y-%m-%d").to_string())
}

/// Formats an hour-of-day value (`7.5` is half past seven) as `HH:MM`,
/// wrapping past midnight.
#[must_use]
pub fn format_hour_label(hours: f64) -> Option<String> {
    if !hours.is_finite() {
        return None;
    }
    let minutes = ((hours * 60.0).round() as i64).rem_euclid(24 * 60);
    Some(format!("{:02}:{:02}", minutes / 60, minutes % 60))
}
