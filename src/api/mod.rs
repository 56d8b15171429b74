//! Public entry points: chart assembly, JSON configuration and axis label
//! helpers.

mod axis_labels;
mod chart;
mod config;

pub use axis_labels::{
    DEFAULT_MAX_X_LABELS, DEFAULT_MIN_LABEL_SPACING_PX, GRID_MULTIPLE_TOLERANCE, GridTick,
    format_hour_label, format_time_label, thin_x_labels, x_label_step, y_grid_labels,
};
pub use chart::GlyphChart;
pub use config::{GlyphChartConfig, GlyphKind};
