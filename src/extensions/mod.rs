//! Glyph plugins and the host hook contract they implement.
//!
//! A plugin mutates the host's options once when the chart is configured
//! and paints its glyphs once per repaint, after the host's own primitives.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::{ChartHost, SeriesArray};
use crate::render::DrawSurface;

pub mod box_glyphs;
pub mod duration_bars;
pub mod overlays;

pub use box_glyphs::{
    BoxColumns, BoxGlyphPlugin, BoxGlyphStyle, OutlierAutoRange, draw_box_glyphs,
};
pub use duration_bars::{DurationBarPlugin, DurationBarStyle, draw_duration_bars};
pub use overlays::{IndicatorSpec, OverlaySpec, SeriesDecorations, draw_indicator, draw_overlay};

/// Default rendering the host applies to one series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesDisplay {
    /// Host-drawn line/area paths.
    pub paths: bool,
    /// Host-drawn point markers.
    pub points: bool,
}

impl Default for SeriesDisplay {
    fn default() -> Self {
        Self {
            paths: true,
            points: true,
        }
    }
}

impl SeriesDisplay {
    #[must_use]
    pub fn hidden() -> Self {
        Self {
            paths: false,
            points: false,
        }
    }
}

/// Y-axis range contributor invoked by the host's scale computation.
pub trait AutoRange {
    /// Returns the axis range given the host's data-derived bounds.
    fn range(&self, series: &SeriesArray, data_min: f64, data_max: f64) -> (f64, f64);
}

/// Host options a plugin may adjust during configuration.
#[derive(Clone)]
pub struct HostOptions {
    /// One entry per column, x column first.
    pub series: Vec<SeriesDisplay>,
    /// Whether the host highlights points under the cursor.
    pub cursor_points: bool,
    pub y_range: Option<Arc<dyn AutoRange + Send + Sync>>,
}

impl HostOptions {
    #[must_use]
    pub fn for_columns(column_count: usize) -> Self {
        Self {
            series: vec![SeriesDisplay::default(); column_count],
            cursor_points: true,
            y_range: None,
        }
    }
}

impl fmt::Debug for HostOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostOptions")
            .field("series", &self.series)
            .field("cursor_points", &self.cursor_points)
            .field("y_range", &self.y_range.as_ref().map(|_| "AutoRange"))
            .finish()
    }
}

/// Hook pair registered with the host.
pub trait GlyphPlugin {
    fn id(&self) -> &str;

    /// Options-mutation hook, run once per chart configuration.
    fn configure(&self, options: &mut HostOptions);

    /// Draw hook, run once per repaint.
    fn draw(&self, host: &dyn ChartHost, surface: &mut dyn DrawSurface);
}
