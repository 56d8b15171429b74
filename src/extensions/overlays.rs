use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::core::{
    Axis, ChartHost, FieldIndexMap, PixelPoint, SlotParams, build_monotone_spline, resolve_slot,
};
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, DrawSurface, LineCap, SurfaceGuard};

fn default_decoration_color() -> Color {
    Color::WHITE
}

fn default_overlay_line_width() -> f64 {
    2.0
}

fn default_indicator_thickness() -> f64 {
    2.0
}

fn default_indicator_width_factor() -> f64 {
    0.6
}

/// Continuous curve drawn over the glyph layer for one value column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlaySpec {
    pub field: String,
    #[serde(default = "default_decoration_color")]
    pub color: Color,
    #[serde(default = "default_overlay_line_width")]
    pub line_width: f64,
    /// Monotone spline instead of straight segments.
    #[serde(default)]
    pub spline: bool,
    #[serde(default)]
    pub disabled: bool,
}

impl OverlaySpec {
    #[must_use]
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            color: default_decoration_color(),
            line_width: default_overlay_line_width(),
            spline: false,
            disabled: false,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn with_line_width(mut self, line_width: f64) -> Self {
        self.line_width = line_width;
        self
    }

    #[must_use]
    pub fn with_spline(mut self, spline: bool) -> Self {
        self.spline = spline;
        self
    }

    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.line_width.is_finite() || self.line_width <= 0.0 {
            return Err(ChartError::InvalidData(format!(
                "overlay `{}` line width must be finite and > 0",
                self.field
            )));
        }
        self.color.validate()
    }
}

/// Short horizontal tick drawn per index for one value column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSpec {
    pub field: String,
    #[serde(default = "default_decoration_color")]
    pub color: Color,
    #[serde(default = "default_indicator_thickness")]
    pub thickness: f64,
    /// Tick length as a fraction of the slot width.
    #[serde(default = "default_indicator_width_factor")]
    pub width_factor: f64,
    #[serde(default)]
    pub disabled: bool,
}

impl IndicatorSpec {
    #[must_use]
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            color: default_decoration_color(),
            thickness: default_indicator_thickness(),
            width_factor: default_indicator_width_factor(),
            disabled: false,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn with_thickness(mut self, thickness: f64) -> Self {
        self.thickness = thickness;
        self
    }

    #[must_use]
    pub fn with_width_factor(mut self, width_factor: f64) -> Self {
        self.width_factor = width_factor;
        self
    }

    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        for (value, name) in [
            (self.thickness, "thickness"),
            (self.width_factor, "width_factor"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "indicator `{}` {name} must be finite and > 0",
                    self.field
                )));
            }
        }
        self.color.validate()
    }
}

/// Strokes one overlay curve through the non-null values of `column`.
///
/// Returns `false` when fewer than two points are available.
pub fn draw_overlay(
    surface: &mut dyn DrawSurface,
    host: &dyn ChartHost,
    x_pixels: &[f64],
    spec: &OverlaySpec,
    column: usize,
) -> bool {
    let series = host.series();
    let points: Vec<PixelPoint> = x_pixels
        .iter()
        .enumerate()
        .filter_map(|(index, &x)| {
            let value = series.value(column, index)?;
            Some(PixelPoint::new(x, host.value_to_pixel(value, Axis::Y, false)))
        })
        .collect();

    if points.len() < 2 {
        return false;
    }

    let mut scope = SurfaceGuard::new(surface);
    scope.set_stroke_color(spec.color);
    scope.set_line_width(spec.line_width);
    scope.begin_path();

    let spline = if spec.spline {
        build_monotone_spline(&points)
    } else {
        None
    };
    match spline {
        Some(spline) => {
            scope.move_to(spline.start.x, spline.start.y);
            for segment in &spline.segments {
                scope.bezier_curve_to(
                    segment.control1.x,
                    segment.control1.y,
                    segment.control2.x,
                    segment.control2.y,
                    segment.end.x,
                    segment.end.y,
                );
            }
        }
        None => {
            scope.move_to(points[0].x, points[0].y);
            for point in &points[1..] {
                scope.line_to(point.x, point.y);
            }
        }
    }

    scope.stroke();
    true
}

/// Strokes one round-capped tick per non-null value of `column`, centered on
/// the index's slot. Returns the number of ticks drawn.
pub fn draw_indicator(
    surface: &mut dyn DrawSurface,
    host: &dyn ChartHost,
    x_pixels: &[f64],
    spec: &IndicatorSpec,
    column: usize,
    slot: SlotParams,
) -> usize {
    let series = host.series();
    let plot_width = host.plot_box().width;
    let mut scope = SurfaceGuard::new(surface);
    scope.set_stroke_color(spec.color);
    scope.set_line_width(spec.thickness);
    scope.set_line_cap(LineCap::Round);

    let mut drawn = 0;
    for index in 0..x_pixels.len() {
        let Some(value) = series.value(column, index) else {
            continue;
        };
        let Some(geometry) = resolve_slot(x_pixels, index, plot_width, slot) else {
            continue;
        };

        let half = geometry.slot_width * spec.width_factor / 2.0;
        let y = host.value_to_pixel(value, Axis::Y, false);
        scope.begin_path();
        scope.move_to(geometry.center - half, y);
        scope.line_to(geometry.center + half, y);
        scope.stroke();
        drawn += 1;
    }
    drawn
}

/// Overlay and indicator specs with their columns resolved up front.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesDecorations {
    overlays: Vec<(OverlaySpec, usize)>,
    indicators: Vec<(IndicatorSpec, usize)>,
}

impl SeriesDecorations {
    /// Validates the specs and resolves their field names through `fields`.
    ///
    /// Specs naming an unknown field are dropped with a warning; they would
    /// never draw anything.
    pub fn new(
        overlays: Vec<OverlaySpec>,
        indicators: Vec<IndicatorSpec>,
        fields: &FieldIndexMap,
    ) -> ChartResult<Self> {
        let mut resolved = Self::default();

        for spec in overlays {
            spec.validate()?;
            match fields.get(&spec.field) {
                Some(column) => resolved.overlays.push((spec, column)),
                None => warn!(field = %spec.field, "overlay skipped: unknown field"),
            }
        }
        for spec in indicators {
            spec.validate()?;
            match fields.get(&spec.field) {
                Some(column) => resolved.indicators.push((spec, column)),
                None => warn!(field = %spec.field, "indicator skipped: unknown field"),
            }
        }

        Ok(resolved)
    }

    #[must_use]
    pub fn overlay_count(&self) -> usize {
        self.overlays.len()
    }

    #[must_use]
    pub fn indicator_count(&self) -> usize {
        self.indicators.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty() && self.indicators.is_empty()
    }

    /// Draws enabled overlays, then enabled indicators, in declaration order.
    pub fn draw(
        &self,
        surface: &mut dyn DrawSurface,
        host: &dyn ChartHost,
        x_pixels: &[f64],
        slot: SlotParams,
    ) {
        if x_pixels.is_empty() || self.is_empty() {
            return;
        }

        let mut curves = 0;
        for (spec, column) in self.overlays.iter().filter(|(spec, _)| !spec.disabled) {
            if draw_overlay(surface, host, x_pixels, spec, *column) {
                curves += 1;
            }
        }

        let mut ticks = 0;
        for (spec, column) in self.indicators.iter().filter(|(spec, _)| !spec.disabled) {
            ticks += draw_indicator(surface, host, x_pixels, spec, *column, slot);
        }

        trace!(curves, ticks, "series decorations drawn");
    }
}
