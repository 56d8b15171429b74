use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{
    Axis, ChartHost, IndexRange, SeriesArray, SlotParams, range_num, resolve_slot, x_pixels,
};
use crate::error::{ChartError, ChartResult};
use crate::extensions::{AutoRange, GlyphPlugin, HostOptions, SeriesDecorations, SeriesDisplay};
use crate::render::{Color, DrawSurface, SurfaceGuard};

/// Column indices of the five-number summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxColumns {
    pub median: usize,
    pub q1: usize,
    pub q3: usize,
    pub min: usize,
    pub max: usize,
}

impl Default for BoxColumns {
    fn default() -> Self {
        Self {
            median: 1,
            q1: 2,
            q3: 3,
            min: 4,
            max: 5,
        }
    }
}

/// Style of box-and-whisker glyphs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxGlyphStyle {
    pub slot: SlotParams,
    /// Whisker, shadow line and box border color.
    pub shadow_color: Color,
    pub body_color: Color,
    pub median_color: Color,
    pub outlier_color: Color,
    /// Line width of the shadow line and whisker caps.
    pub shadow_width: f64,
    /// Border thickness simulated by insetting the body fill.
    pub body_outline: f64,
    pub shadow_dash: Vec<f64>,
    pub median_height: f64,
    pub outlier_size: f64,
    pub show_median: bool,
    pub show_outliers: bool,
    /// Axis padding applied by the outlier-aware auto-range.
    pub range_padding: f64,
    pub columns: BoxColumns,
}

impl Default for BoxGlyphStyle {
    fn default() -> Self {
        Self {
            slot: SlotParams::new(2.0, 0.7, false),
            shadow_color: Color::BLACK,
            body_color: Color::from_rgba8(0xee, 0xee, 0xee, 1.0),
            median_color: Color::BLACK,
            outlier_color: Color::BLACK,
            shadow_width: 2.0,
            body_outline: 1.0,
            shadow_dash: vec![4.0, 4.0],
            median_height: 2.0,
            outlier_size: 8.0,
            show_median: true,
            show_outliers: true,
            range_padding: 0.1,
            columns: BoxColumns::default(),
        }
    }
}

impl BoxGlyphStyle {
    pub fn validate(self) -> ChartResult<Self> {
        self.slot.validate()?;
        for color in [
            self.shadow_color,
            self.body_color,
            self.median_color,
            self.outlier_color,
        ] {
            color.validate()?;
        }
        for (value, name) in [
            (self.shadow_width, "shadow_width"),
            (self.median_height, "median_height"),
            (self.outlier_size, "outlier_size"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "box style `{name}` must be finite and > 0"
                )));
            }
        }
        for (value, name) in [
            (self.body_outline, "body_outline"),
            (self.range_padding, "range_padding"),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "box style `{name}` must be finite and >= 0"
                )));
            }
        }
        if self
            .shadow_dash
            .iter()
            .any(|segment| !segment.is_finite() || *segment < 0.0)
        {
            return Err(ChartError::InvalidData(
                "shadow dash segments must be finite and >= 0".to_owned(),
            ));
        }
        let columns = self.columns;
        if [columns.median, columns.q1, columns.q3, columns.min, columns.max].contains(&0) {
            return Err(ChartError::InvalidData(
                "box summary must reference value columns (>= 1)".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Paints box glyphs for every index in `range`.
///
/// Per index, in order: dashed shadow line from min to max, bordered body
/// from q1 to q3, median bar, min/max whisker caps, outlier squares. Each
/// element whose values are missing is skipped on its own. Summaries are
/// drawn as given; a q1 above q3 yields an inverted box rather than an
/// error. Returns the number of bodies painted.
pub fn draw_box_glyphs(
    surface: &mut dyn DrawSurface,
    host: &dyn ChartHost,
    x_pixels: &[f64],
    range: IndexRange,
    style: &BoxGlyphStyle,
) -> usize {
    let Some(range) = range.clamp_to_len(x_pixels.len()) else {
        return 0;
    };

    let series = host.series();
    let plot_width = host.plot_box().width;
    let columns = style.columns;
    let y = |value: f64| host.value_to_pixel(value, Axis::Y, false);

    let mut scope = SurfaceGuard::new(surface);
    // Odd line widths land on pixel centers.
    let offset = (style.shadow_width % 2.0) / 2.0;
    scope.translate(offset, offset);

    let mut bodies = 0;
    for index in range.indices() {
        let Some(slot) = resolve_slot(x_pixels, index, plot_width, style.slot) else {
            continue;
        };
        let x = x_pixels[index];
        let left = slot.left;
        let width = slot.slot_width;
        let min_y = series.value(columns.min, index).map(y);
        let max_y = series.value(columns.max, index).map(y);

        if let (Some(low), Some(high)) = (min_y, max_y) {
            scope.begin_path();
            scope.set_line_dash(&style.shadow_dash);
            scope.set_line_width(style.shadow_width);
            scope.set_stroke_color(style.shadow_color);
            scope.move_to(x.round(), low.min(high).round());
            scope.line_to(x.round(), low.max(high).round());
            scope.stroke();
        }

        if let (Some(q1), Some(q3)) = (
            series.value(columns.q1, index).map(y),
            series.value(columns.q3, index).map(y),
        ) {
            let top = q1.min(q3);
            let height = (q1 - q3).abs();
            let outline = style.body_outline;

            scope.set_fill_color(style.shadow_color);
            scope.fill_rect(left.round(), top.round(), width.round(), height.round());
            scope.set_fill_color(style.body_color);
            scope.fill_rect(
                (left + outline).round(),
                (top + outline).round(),
                (width - outline * 2.0).max(0.0).round(),
                (height - outline * 2.0).max(0.0).round(),
            );
            bodies += 1;
        }

        if style.show_median {
            if let Some(median) = series.value(columns.median, index).map(y) {
                scope.set_fill_color(style.median_color);
                scope.fill_rect(
                    left.round(),
                    (median - style.median_height / 2.0).round(),
                    width.round(),
                    style.median_height.round(),
                );
            }
        }

        if min_y.is_some() || max_y.is_some() {
            scope.begin_path();
            scope.set_line_dash(&[]);
            scope.set_line_width(style.shadow_width);
            scope.set_stroke_color(style.shadow_color);
            for cap in [max_y, min_y].into_iter().flatten() {
                scope.move_to(left.round(), cap.round());
                scope.line_to((left + width).round(), cap.round());
            }
            scope.stroke();
        }

        if style.show_outliers {
            let half = style.outlier_size / 2.0;
            scope.set_fill_color(style.outlier_color);
            for &outlier in series.outliers(index) {
                let center_y = y(outlier);
                scope.fill_rect(
                    x - half,
                    center_y - half,
                    style.outlier_size,
                    style.outlier_size,
                );
            }
        }
    }

    trace!(bodies, first = range.min, last = range.max, "box glyphs drawn");
    bodies
}

/// Y range that also covers every outlier, padded for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlierAutoRange {
    pub padding: f64,
}

impl AutoRange for OutlierAutoRange {
    fn range(&self, series: &SeriesArray, data_min: f64, data_max: f64) -> (f64, f64) {
        let (low, high) = match series.outlier_bounds() {
            Some((outlier_min, outlier_max)) => {
                (data_min.min(outlier_min), data_max.max(outlier_max))
            }
            None => (data_min, data_max),
        };
        range_num(low, high, self.padding, true)
    }
}

/// Box-and-whisker glyphs with optional overlays and indicators on top.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxGlyphPlugin {
    style: BoxGlyphStyle,
    decorations: SeriesDecorations,
}

impl BoxGlyphPlugin {
    pub fn new(style: BoxGlyphStyle) -> ChartResult<Self> {
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
    pub fn style(&self) -> &BoxGlyphStyle {
        &self.style
    }
}

impl GlyphPlugin for BoxGlyphPlugin {
    fn id(&self) -> &str {
        "box_glyphs"
    }

    fn configure(&self, options: &mut HostOptions) {
        options.cursor_points = false;
        for display in &mut options.series {
            *display = SeriesDisplay::hidden();
        }
        if self.style.show_outliers {
            options.y_range = Some(Arc::new(OutlierAutoRange {
                padding: self.style.range_padding,
            }));
        }
        debug!(
            outliers = self.style.show_outliers,
            "box glyphs own all series"
        );
    }

    fn draw(&self, host: &dyn ChartHost, surface: &mut dyn DrawSurface) {
        let Some(range) = host.visible_index_range() else {
            return;
        };
        let pixels = x_pixels(host);
        if pixels.is_empty() {
            return;
        }
        draw_box_glyphs(surface, host, &pixels, range, &self.style);
        self.decorations.draw(surface, host, &pixels, self.style.slot);
    }
}

#[cfg(test)]
mod tests {
    use super::{BoxGlyphPlugin, BoxGlyphStyle, OutlierAutoRange, draw_box_glyphs};
    use crate::core::{IndexRange, LinearHost, LinearScale, PlotBox, SeriesArray, SlotParams};
    use crate::extensions::{AutoRange, GlyphPlugin, HostOptions};
    use crate::render::{Color, DrawCommand, PathOp, RecordingSurface};
    use approx::assert_abs_diff_eq;

    fn summary_host(rows: &[[Option<f64>; 5]], outliers: Vec<Vec<f64>>) -> LinearHost {
        let x = (0..rows.len()).map(|i| i as f64).collect();
        let columns = (0..5)
            .map(|column| rows.iter().map(|row| row[column]).collect())
            .collect();
        let series = SeriesArray::new(x, columns)
            .expect("series")
            .with_outliers(outliers)
            .expect("outliers");
        LinearHost::new(
            series,
            PlotBox::new(100.0, 100.0),
            LinearScale::new(0.0, 10.0).expect("x"),
            LinearScale::new(0.0, 100.0).expect("y"),
        )
        .expect("host")
    }

    fn even_style() -> BoxGlyphStyle {
        BoxGlyphStyle {
            slot: SlotParams::new(0.0, 1.0, false),
            ..BoxGlyphStyle::default()
        }
    }

    #[test]
    fn glyph_layers_are_painted_in_order() {
        let host = summary_host(
            &[
                [Some(50.0), Some(40.0), Some(60.0), Some(20.0), Some(80.0)],
                [Some(50.0), Some(40.0), Some(60.0), Some(20.0), Some(80.0)],
            ],
            vec![vec![95.0], vec![]],
        );
        let mut surface = RecordingSurface::new();
        let bodies = draw_box_glyphs(
            &mut surface,
            &host,
            &[20.0, 40.0],
            IndexRange::new(0, 0),
            &even_style(),
        );
        assert_eq!(bodies, 1);

        let commands = surface.commands();
        assert_eq!(commands.len(), 6);

        let DrawCommand::StrokePath {
            path, line_dash, ..
        } = &commands[0]
        else {
            panic!("shadow first");
        };
        assert_eq!(line_dash, &vec![4.0, 4.0]);
        assert!(matches!(path[0], PathOp::MoveTo(p) if p.x == 20.0 && p.y == 20.0));
        assert!(matches!(path[1], PathOp::LineTo(p) if p.x == 20.0 && p.y == 80.0));

        let DrawCommand::FillRect {
            x,
            y,
            width,
            height,
            color,
        } = commands[1]
        else {
            panic!("outer body second");
        };
        assert_eq!((x, y, width, height, color), (10.0, 40.0, 20.0, 20.0, Color::BLACK));

        let DrawCommand::FillRect {
            x, y, width, height, ..
        } = commands[2]
        else {
            panic!("inner body third");
        };
        assert_eq!((x, y, width, height), (11.0, 41.0, 18.0, 18.0));

        let DrawCommand::FillRect { y, height, .. } = commands[3] else {
            panic!("median fourth");
        };
        assert_eq!((y, height), (49.0, 2.0));

        let DrawCommand::StrokePath {
            path, line_dash, ..
        } = &commands[4]
        else {
            panic!("whiskers fifth");
        };
        assert!(line_dash.is_empty());
        assert_eq!(path.len(), 4);

        let DrawCommand::FillRect {
            x, y, width, height, ..
        } = commands[5]
        else {
            panic!("outlier last");
        };
        assert_eq!((x, y, width, height), (16.0, 1.0, 8.0, 8.0));

        assert_eq!(surface.depth(), 0);
        assert_eq!(surface.state().translation, (0.0, 0.0));
    }

    #[test]
    fn odd_shadow_width_shifts_by_half_pixel() {
        let host = summary_host(
            &[[None, Some(40.0), Some(60.0), None, None]],
            vec![vec![]],
        );
        let style = BoxGlyphStyle {
            shadow_width: 1.0,
            show_median: false,
            ..even_style()
        };
        let mut surface = RecordingSurface::new();
        draw_box_glyphs(&mut surface, &host, &[50.0], IndexRange::new(0, 0), &style);

        let DrawCommand::FillRect { x, y, .. } = surface.commands()[0] else {
            panic!("body");
        };
        assert_abs_diff_eq!(x, 0.5);
        assert_abs_diff_eq!(y, 40.5);
        assert_eq!(surface.commands().len(), 2);
    }

    #[test]
    fn hidden_outliers_and_median_are_not_painted() {
        let host = summary_host(
            &[[Some(50.0), Some(40.0), Some(60.0), Some(20.0), Some(80.0)]],
            vec![vec![1.0, 99.0]],
        );
        let style = BoxGlyphStyle {
            show_median: false,
            show_outliers: false,
            ..even_style()
        };
        let mut surface = RecordingSurface::new();
        draw_box_glyphs(&mut surface, &host, &[50.0], IndexRange::new(0, 0), &style);
        assert_eq!(surface.filled_rects().count(), 2);
    }

    #[test]
    fn inverted_summary_still_draws() {
        let host = summary_host(
            &[[Some(50.0), Some(70.0), Some(30.0), Some(90.0), Some(10.0)]],
            vec![vec![]],
        );
        let mut surface = RecordingSurface::new();
        let bodies = draw_box_glyphs(
            &mut surface,
            &host,
            &[50.0],
            IndexRange::new(0, 0),
            &even_style(),
        );
        assert_eq!(bodies, 1);
    }

    #[test]
    fn auto_range_covers_outliers_and_tolerates_empty_sets() {
        let series = SeriesArray::new(vec![0.0, 1.0, 2.0], vec![])
            .expect("series")
            .with_outliers(vec![vec![1.0, 9.0], vec![], vec![5.0]])
            .expect("outliers");
        let (low, high) = OutlierAutoRange { padding: 0.1 }.range(&series, 2.0, 8.0);
        assert!(low < 1.0);
        assert!(high > 9.0);
        assert_abs_diff_eq!(low, 0.2, epsilon = 1e-9);
        assert_abs_diff_eq!(high, 9.8, epsilon = 1e-9);

        let empty = SeriesArray::new(vec![0.0], vec![])
            .expect("series")
            .with_outliers(vec![vec![]])
            .expect("outliers");
        let (low, high) = OutlierAutoRange { padding: 0.1 }.range(&empty, 2.0, 8.0);
        assert!(low < 2.0 && high > 8.0);
    }

    #[test]
    fn configure_hides_series_and_registers_range() {
        let plugin = BoxGlyphPlugin::new(BoxGlyphStyle::default()).expect("plugin");
        let mut options = HostOptions::for_columns(7);
        plugin.configure(&mut options);
        assert!(!options.cursor_points);
        assert!(options.series.iter().all(|display| !display.paths && !display.points));
        assert!(options.y_range.is_some());

        let quiet = BoxGlyphPlugin::new(BoxGlyphStyle {
            show_outliers: false,
            ..BoxGlyphStyle::default()
        })
        .expect("plugin");
        let mut options = HostOptions::for_columns(7);
        quiet.configure(&mut options);
        assert!(options.y_range.is_none());
    }

    #[test]
    fn style_validation_rejects_zero_columns() {
        let mut style = BoxGlyphStyle::default();
        style.columns.q1 = 0;
        assert!(BoxGlyphPlugin::new(style).is_err());
    }
}
