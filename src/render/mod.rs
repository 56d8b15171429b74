mod primitives;
mod recording;
mod surface;

pub use primitives::{Color, LineCap};
pub use recording::{DrawCommand, PathOp, RecordingSurface, SurfaceState};
pub use surface::{DrawSurface, SurfaceGuard};

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoSurface, CairoSurfaceStats};
