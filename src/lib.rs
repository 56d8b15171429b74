//! chart-glyphs: custom glyph layers for a host time-series chart.
//!
//! The crate paints duration bars and box-and-whisker glyphs, with optional
//! overlay curves and indicator ticks, through a small host contract
//! (`core::ChartHost`) and a canvas-like drawing seam (`render::DrawSurface`).

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod render;
pub mod telemetry;

pub use api::{GlyphChart, GlyphChartConfig, GlyphKind};
pub use error::{ChartError, ChartResult};
