use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{Axis, ChartHost, SlotParams, resolve_slot, x_pixels};
use crate::error::{ChartError, ChartResult};
use crate::extensions::{GlyphPlugin, HostOptions, SeriesDecorations, SeriesDisplay};
use crate::render::{Color, DrawSurface, SurfaceGuard};

/// Style of paired start/end duration bars.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DurationBarStyle {
    pub slot: SlotParams,
    pub fill_color: Color,
    pub outline_color: Color,
    /// Outline thickness; `0` disables the outline.
    pub outline_width: f64,
    pub start_column: usize,
    pub end_column: usize,
}

impl Default for DurationBarStyle {
    fn default() -> Self {
        Self {
            slot: SlotParams::default(),
            fill_color: Color::from_rgba8(0, 128, 255, 0.4),
            outline_color: Color::BLACK,
            outline_width: 1.0,
            start_column: 1,
            end_column: 2,
        }
    }
}

impl DurationBarStyle {
    pub fn validate(self) -> ChartResult<Self> {
        self.slot.validate()?;
        self.fill_color.validate()?;
        self.outline_color.validate()?;
        if !self.outline_width.is_finite() || self.outline_width < 0.0 {
            return Err(ChartError::InvalidData(
                "bar outline width must be finite and >= 0".to_owned(),
            ));
        }
        if self.start_column == 0 || self.end_column == 0 {
            return Err(ChartError::InvalidData(
                "bar start/end must reference value columns (>= 1)".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Paints one bar per index whose start and end are both present.
///
/// Bars span `[min(y0, y1), max(y0, y1)]` vertically and the resolved slot
/// horizontally; fills are snapped to whole pixels and the optional outline
/// sits inside the fill. Returns the number of bars painted.
pub fn draw_duration_bars(
    surface: &mut dyn DrawSurface,
    host: &dyn ChartHost,
    x_pixels: &[f64],
    style: &DurationBarStyle,
) -> usize {
    if x_pixels.is_empty() {
        return 0;
    }

    let series = host.series();
    let plot_width = host.plot_box().width;
    let mut scope = SurfaceGuard::new(surface);
    let mut painted = 0;

    for index in 0..x_pixels.len() {
        let (Some(start), Some(end)) = (
            series.value(style.start_column, index),
            series.value(style.end_column, index),
        ) else {
            continue;
        };
        let Some(slot) = resolve_slot(x_pixels, index, plot_width, style.slot) else {
            continue;
        };

        let start_y = host.value_to_pixel(start, Axis::Y, false);
        let end_y = host.value_to_pixel(end, Axis::Y, false);
        let left = slot.left.round();
        let top = start_y.min(end_y).round();
        let width = slot.slot_width.round();
        let height = (start_y - end_y).abs().round();

        scope.set_fill_color(style.fill_color);
        scope.fill_rect(left, top, width, height);

        if style.outline_width > 0.0 {
            let inset = style.outline_width / 2.0;
            scope.set_stroke_color(style.outline_color);
            scope.set_line_width(style.outline_width);
            scope.stroke_rect(
                left + inset,
                top + inset,
                width - style.outline_width,
                height - style.outline_width,
            );
        }
        painted += 1;
    }

    trace!(painted, total = x_pixels.len(), "duration bars drawn");
    painted
}

/// Duration bars with optional overlay curves and indicator ticks on top.
#[derive(Debug, Clone, PartialEq)]
pub struct DurationBarPlugin {
    style: DurationBarStyle,
    decorations: SeriesDecorations,
}

impl DurationBarPlugin {
    pub fn new(style: DurationBarStyle) -> ChartResult<Self> {
        Ok(Self {
            style: style.validate()?,
            decorations: SeriesDecorations::default(),
        })
    }

    #[must_use]
    pub fn with_decorations(mut self, decorations: SeriesDecorations) -> Self {
        self.decorations = decorations;
        self
    }

    #[must_use]
    pub fn style(&self) -> &DurationBarStyle {
        &self.style
    }

    #[must_use]
    pub fn decorations(&self) -> &SeriesDecorations {
        &self.decorations
    }
}

impl GlyphPlugin for DurationBarPlugin {
    fn id(&self) -> &str {
        "duration_bars"
    }

    fn configure(&self, options: &mut HostOptions) {
        for display in options.series.iter_mut().skip(1) {
            *display = SeriesDisplay::hidden();
        }
        debug!(
            hidden = options.series.len().saturating_sub(1),
            "duration bars own all value series"
        );
    }

    fn draw(&self, host: &dyn ChartHost, surface: &mut dyn DrawSurface) {
        let pixels = x_pixels(host);
        if pixels.is_empty() {
            return;
        }
        draw_duration_bars(surface, host, &pixels, &self.style);
        self.decorations.draw(surface, host, &pixels, self.style.slot);
    }
}

#[cfg(test)]
mod tests {
    use super::{DurationBarPlugin, DurationBarStyle, draw_duration_bars};
    use crate::core::{LinearHost, LinearScale, PlotBox, SeriesArray, SlotParams};
    use crate::extensions::{GlyphPlugin, HostOptions, SeriesDisplay};
    use crate::render::{DrawCommand, RecordingSurface};

    fn host(starts: Vec<Option<f64>>, ends: Vec<Option<f64>>) -> LinearHost {
        let x = (0..starts.len()).map(|i| i as f64).collect();
        let series = SeriesArray::new(x, vec![starts, ends]).expect("series");
        LinearHost::new(
            series,
            PlotBox::new(100.0, 100.0),
            LinearScale::new(0.0, 10.0).expect("x"),
            LinearScale::new(0.0, 10.0).expect("y"),
        )
        .expect("host")
    }

    #[test]
    fn bar_spans_start_to_end_with_inset_outline() {
        let host = host(vec![Some(2.0), Some(3.0)], vec![Some(6.0), Some(5.0)]);
        let style = DurationBarStyle {
            slot: SlotParams::new(4.0, 1.0, false),
            outline_width: 2.0,
            ..DurationBarStyle::default()
        };
        let mut surface = RecordingSurface::new();
        let painted = draw_duration_bars(&mut surface, &host, &[0.0, 10.0], &style);
        assert_eq!(painted, 2);

        let DrawCommand::FillRect {
            x,
            y,
            width,
            height,
            ..
        } = surface.commands()[0]
        else {
            panic!("expected fill first");
        };
        assert_eq!((x, y, width, height), (-3.0, 40.0, 6.0, 40.0));

        let DrawCommand::StrokeRect {
            x,
            y,
            width,
            height,
            line_width,
            ..
        } = surface.commands()[1]
        else {
            panic!("expected outline second");
        };
        assert_eq!((x, y, width, height, line_width), (-2.0, 41.0, 4.0, 38.0, 2.0));
    }

    #[test]
    fn null_start_or_end_skips_index_and_keeps_state() {
        let host = host(vec![Some(5.0), Some(1.0)], vec![None, Some(2.0)]);
        let mut surface = RecordingSurface::new();
        let before = surface.state().clone();
        let painted = draw_duration_bars(
            &mut surface,
            &host,
            &[10.0, 20.0],
            &DurationBarStyle::default(),
        );
        assert_eq!(painted, 1);
        assert_eq!(surface.filled_rects().count(), 1);
        assert_eq!(surface.state(), &before);
        assert_eq!(surface.depth(), 0);
    }

    #[test]
    fn zero_outline_width_skips_outline() {
        let host = host(vec![Some(1.0)], vec![Some(2.0)]);
        let style = DurationBarStyle {
            outline_width: 0.0,
            ..DurationBarStyle::default()
        };
        let mut surface = RecordingSurface::new();
        draw_duration_bars(&mut surface, &host, &[50.0], &style);
        assert_eq!(surface.stroked_rects().count(), 0);
        assert_eq!(surface.filled_rects().count(), 1);
    }

    #[test]
    fn configure_hides_value_series_only() {
        let plugin = DurationBarPlugin::new(DurationBarStyle::default()).expect("plugin");
        let mut options = HostOptions::for_columns(3);
        plugin.configure(&mut options);
        assert_eq!(options.series[0], SeriesDisplay::default());
        assert_eq!(options.series[1], SeriesDisplay::hidden());
        assert_eq!(options.series[2], SeriesDisplay::hidden());
        assert!(options.y_range.is_none());
    }

    #[test]
    fn style_validation_rejects_negative_outline() {
        let style = DurationBarStyle {
            outline_width: -1.0,
            ..DurationBarStyle::default()
        };
        assert!(DurationBarPlugin::new(style).is_err());
    }
}
