use std::ops::{Deref, DerefMut};

use crate::render::{Color, LineCap};

/// Stateful 2D drawing surface owned by the host.
///
/// Mirrors a canvas-style context: style setters mutate the current state,
/// `save`/`restore` push and pop it, and path construction accumulates until
/// the next `begin_path`.
pub trait DrawSurface {
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, dx: f64, dy: f64);

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn bezier_curve_to(&mut self, c1x: f64, c1y: f64, c2x: f64, c2y: f64, x: f64, y: f64);
    fn stroke(&mut self);
    fn fill(&mut self);

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Sets the dash pattern; an empty slice restores solid strokes.
    fn set_line_dash(&mut self, segments: &[f64]);
    fn set_fill_color(&mut self, color: Color);
    fn set_stroke_color(&mut self, color: Color);
    fn set_line_width(&mut self, width: f64);
    fn set_line_cap(&mut self, cap: LineCap);
}

/// Drawing-state scope: saves on creation and restores on drop.
///
/// Renderers draw through the guard so every exit path, early returns
/// included, leaves the surface state as it found it.
pub struct SurfaceGuard<'a, S: DrawSurface + ?Sized> {
    surface: &'a mut S,
}

impl<'a, S: DrawSurface + ?Sized> SurfaceGuard<'a, S> {
    pub fn new(surface: &'a mut S) -> Self {
        surface.save();
        Self { surface }
    }
}

impl<S: DrawSurface + ?Sized> Deref for SurfaceGuard<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.surface
    }
}

impl<S: DrawSurface + ?Sized> DerefMut for SurfaceGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.surface
    }
}

impl<S: DrawSurface + ?Sized> Drop for SurfaceGuard<'_, S> {
    fn drop(&mut self) {
        self.surface.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::{DrawSurface, SurfaceGuard};
    use crate::render::{Color, RecordingSurface};

    fn styled_early_return(surface: &mut dyn DrawSurface, bail: bool) {
        let mut scope = SurfaceGuard::new(surface);
        scope.set_fill_color(Color::WHITE);
        if bail {
            return;
        }
        scope.fill_rect(0.0, 0.0, 1.0, 1.0);
    }

    #[test]
    fn guard_restores_on_every_exit_path() {
        let mut surface = RecordingSurface::new();
        let before = surface.state().clone();

        styled_early_return(&mut surface, true);
        assert_eq!(surface.state(), &before);
        styled_early_return(&mut surface, false);
        assert_eq!(surface.state(), &before);
        assert_eq!(surface.depth(), 0);
        assert_eq!(surface.filled_rects().count(), 1);
    }
}
