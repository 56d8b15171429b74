use crate::core::PixelPoint;
use crate::render::{Color, DrawSurface, LineCap};

/// Drawing state tracked by `RecordingSurface`, defaulting to canvas defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceState {
    pub fill_color: Color,
    pub stroke_color: Color,
    pub line_width: f64,
    pub line_dash: Vec<f64>,
    pub line_cap: LineCap,
    pub translation: (f64, f64),
}

impl Default for SurfaceState {
    fn default() -> Self {
        Self {
            fill_color: Color::BLACK,
            stroke_color: Color::BLACK,
            line_width: 1.0,
            line_dash: Vec::new(),
            line_cap: LineCap::Butt,
            translation: (0.0, 0.0),
        }
    }
}

/// Path element in device pixels (translation already applied).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathOp {
    MoveTo(PixelPoint),
    LineTo(PixelPoint),
    BezierTo {
        control1: PixelPoint,
        control2: PixelPoint,
        end: PixelPoint,
    },
}

/// One painted primitive with the style that was active when it was painted.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Color,
    },
    StrokeRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Color,
        line_width: f64,
    },
    StrokePath {
        path: Vec<PathOp>,
        color: Color,
        line_width: f64,
        line_dash: Vec<f64>,
        line_cap: LineCap,
    },
    FillPath {
        path: Vec<PathOp>,
        color: Color,
    },
}

/// In-memory surface used by tests, benches and headless consumers.
///
/// Records every painted primitive and keeps the save/restore stack so
/// callers can check that renderers leave no style behind.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    state: SurfaceState,
    stack: Vec<SurfaceState>,
    path: Vec<PathOp>,
    commands: Vec<DrawCommand>,
    unbalanced_restores: usize,
}

impl RecordingSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    #[must_use]
    pub fn state(&self) -> &SurfaceState {
        &self.state
    }

    /// Number of `save` calls not yet matched by a `restore`.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// `restore` calls that had no matching `save`.
    #[must_use]
    pub fn unbalanced_restores(&self) -> usize {
        self.unbalanced_restores
    }

    pub fn filled_rects(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|command| matches!(command, DrawCommand::FillRect { .. }))
    }

    pub fn stroked_rects(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|command| matches!(command, DrawCommand::StrokeRect { .. }))
    }

    pub fn stroked_paths(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|command| matches!(command, DrawCommand::StrokePath { .. }))
    }

    /// Drops recorded commands, keeping the current state.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.path.clear();
    }

    fn device(&self, x: f64, y: f64) -> PixelPoint {
        PixelPoint::new(x + self.state.translation.0, y + self.state.translation.1)
    }
}

impl DrawSurface for RecordingSurface {
    fn save(&mut self) {
        self.stack.push(self.state.clone());
    }

    fn restore(&mut self) {
        match self.stack.pop() {
            Some(state) => self.state = state,
            None => self.unbalanced_restores += 1,
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.state.translation.0 += dx;
        self.state.translation.1 += dy;
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        let point = self.device(x, y);
        self.path.push(PathOp::MoveTo(point));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        let point = self.device(x, y);
        self.path.push(PathOp::LineTo(point));
    }

    fn bezier_curve_to(&mut self, c1x: f64, c1y: f64, c2x: f64, c2y: f64, x: f64, y: f64) {
        let op = PathOp::BezierTo {
            control1: self.device(c1x, c1y),
            control2: self.device(c2x, c2y),
            end: self.device(x, y),
        };
        self.path.push(op);
    }

    fn stroke(&mut self) {
        self.commands.push(DrawCommand::StrokePath {
            path: self.path.clone(),
            color: self.state.stroke_color,
            line_width: self.state.line_width,
            line_dash: self.state.line_dash.clone(),
            line_cap: self.state.line_cap,
        });
    }

    fn fill(&mut self) {
        self.commands.push(DrawCommand::FillPath {
            path: self.path.clone(),
            color: self.state.fill_color,
        });
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let origin = self.device(x, y);
        self.commands.push(DrawCommand::FillRect {
            x: origin.x,
            y: origin.y,
            width,
            height,
            color: self.state.fill_color,
        });
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let origin = self.device(x, y);
        self.commands.push(DrawCommand::StrokeRect {
            x: origin.x,
            y: origin.y,
            width,
            height,
            color: self.state.stroke_color,
            line_width: self.state.line_width,
        });
    }

    fn set_line_dash(&mut self, segments: &[f64]) {
        self.state.line_dash = segments.to_vec();
    }

    fn set_fill_color(&mut self, color: Color) {
        self.state.fill_color = color;
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.state.stroke_color = color;
    }

    fn set_line_width(&mut self, width: f64) {
        self.state.line_width = width;
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.state.line_cap = cap;
    }
}

#[cfg(test)]
mod tests {
    use super::{DrawCommand, PathOp, RecordingSurface};
    use crate::core::PixelPoint;
    use crate::render::{Color, DrawSurface};

    #[test]
    fn records_translated_coordinates() {
        let mut surface = RecordingSurface::new();
        surface.translate(0.5, 0.5);
        surface.begin_path();
        surface.move_to(1.0, 2.0);
        surface.line_to(3.0, 4.0);
        surface.stroke();

        let DrawCommand::StrokePath { path, .. } = &surface.commands()[0] else {
            panic!("expected stroke");
        };
        assert_eq!(
            path,
            &vec![
                PathOp::MoveTo(PixelPoint::new(1.5, 2.5)),
                PathOp::LineTo(PixelPoint::new(3.5, 4.5)),
            ]
        );
    }

    #[test]
    fn restore_without_save_is_counted_not_fatal() {
        let mut surface = RecordingSurface::new();
        surface.set_fill_color(Color::WHITE);
        surface.restore();
        assert_eq!(surface.unbalanced_restores(), 1);
        assert_eq!(surface.state().fill_color, Color::WHITE);
    }

    #[test]
    fn save_restore_round_trips_style() {
        let mut surface = RecordingSurface::new();
        surface.save();
        surface.set_line_dash(&[4.0, 4.0]);
        surface.set_line_width(3.0);
        surface.restore();
        assert!(surface.state().line_dash.is_empty());
        assert_eq!(surface.state().line_width, 1.0);
        assert_eq!(surface.depth(), 0);
    }
}
