use cairo::Context;
use tracing::warn;

use crate::render::{Color, DrawSurface, LineCap};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoSurfaceStats {
    pub fills: usize,
    pub strokes: usize,
    pub failures: usize,
}

/// `DrawSurface` over an external Cairo context (for example a GTK
/// `DrawingArea` callback or an offscreen `ImageSurface`).
///
/// Cairo has a single source color while a canvas keeps separate fill and
/// stroke styles, so both colors are tracked here and applied right before
/// each paint operation. Cairo failures are logged and counted; they never
/// abort the draw pass.
#[derive(Debug)]
pub struct CairoSurface<'a> {
    context: &'a Context,
    fill_color: Color,
    stroke_color: Color,
    color_stack: Vec<(Color, Color)>,
    stats: CairoSurfaceStats,
}

impl<'a> CairoSurface<'a> {
    #[must_use]
    pub fn new(context: &'a Context) -> Self {
        Self {
            context,
            fill_color: Color::BLACK,
            stroke_color: Color::BLACK,
            color_stack: Vec::new(),
            stats: CairoSurfaceStats::default(),
        }
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo"
    }

    #[must_use]
    pub fn stats(&self) -> CairoSurfaceStats {
        self.stats
    }

    fn check(&mut self, operation: &str, result: Result<(), cairo::Error>) {
        if let Err(err) = result {
            self.stats.failures += 1;
            warn!(operation, error = %err, "cairo operation failed");
        }
    }

    fn apply(&self, color: Color) {
        self.context
            .set_source_rgba(color.red, color.green, color.blue, color.alpha);
    }

    /// Paints one rectangle without disturbing the path under construction.
    fn paint_rect(&mut self, x: f64, y: f64, width: f64, height: f64, stroke: bool) {
        let saved_path = match self.context.copy_path() {
            Ok(path) => Some(path),
            Err(err) => {
                self.check("copy_path", Err(err));
                None
            }
        };

        self.context.new_path();
        self.context.rectangle(x, y, width, height);
        let result = if stroke {
            self.apply(self.stroke_color);
            self.stats.strokes += 1;
            self.context.stroke()
        } else {
            self.apply(self.fill_color);
            self.stats.fills += 1;
            self.context.fill()
        };
        self.check("paint_rect", result);

        if let Some(path) = saved_path {
            self.context.append_path(&path);
        }
    }
}

impl DrawSurface for CairoSurface<'_> {
    fn save(&mut self) {
        self.color_stack.push((self.fill_color, self.stroke_color));
        let result = self.context.save();
        self.check("save", result);
    }

    fn restore(&mut self) {
        if let Some((fill, stroke)) = self.color_stack.pop() {
            self.fill_color = fill;
            self.stroke_color = stroke;
            let result = self.context.restore();
            self.check("restore", result);
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.context.translate(dx, dy);
    }

    fn begin_path(&mut self) {
        self.context.new_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.context.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.context.line_to(x, y);
    }

    fn bezier_curve_to(&mut self, c1x: f64, c1y: f64, c2x: f64, c2y: f64, x: f64, y: f64) {
        self.context.curve_to(c1x, c1y, c2x, c2y, x, y);
    }

    fn stroke(&mut self) {
        self.apply(self.stroke_color);
        self.stats.strokes += 1;
        let result = self.context.stroke_preserve();
        self.check("stroke", result);
    }

    fn fill(&mut self) {
        self.apply(self.fill_color);
        self.stats.fills += 1;
        let result = self.context.fill_preserve();
        self.check("fill", result);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.paint_rect(x, y, width, height, false);
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.paint_rect(x, y, width, height, true);
    }

    fn set_line_dash(&mut self, segments: &[f64]) {
        self.context.set_dash(segments, 0.0);
    }

    fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.stroke_color = color;
    }

    fn set_line_width(&mut self, width: f64) {
        self.context.set_line_width(width);
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.context.set_line_cap(match cap {
            LineCap::Butt => cairo::LineCap::Butt,
            LineCap::Round => cairo::LineCap::Round,
            LineCap::Square => cairo::LineCap::Square,
        });
    }
}

#[cfg(test)]
mod tests {
    use cairo::{Context, Format, ImageSurface};

    use super::CairoSurface;
    use crate::render::{Color, DrawSurface};

    #[test]
    fn cairo_surface_paints_and_balances_state() {
        let image = ImageSurface::create(Format::ARgb32, 32, 32).expect("image surface");
        let context = Context::new(&image).expect("context");
        let mut surface = CairoSurface::new(&context);

        surface.save();
        surface.set_fill_color(Color::rgb(1.0, 0.0, 0.0));
        surface.fill_rect(2.0, 2.0, 10.0, 10.0);
        surface.set_stroke_color(Color::BLACK);
        surface.begin_path();
        surface.move_to(0.0, 20.0);
        surface.bezier_curve_to(5.0, 15.0, 10.0, 25.0, 20.0, 20.0);
        surface.stroke();
        surface.restore();

        let stats = surface.stats();
        assert_eq!(stats.fills, 1);
        assert_eq!(stats.strokes, 1);
        assert_eq!(stats.failures, 0);
    }
}
