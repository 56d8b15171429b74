pub mod geometry;
pub mod host;
pub mod range;
pub mod scale;
pub mod series;
pub mod spline;
pub mod types;

pub use geometry::{SlotGeometry, SlotParams, resolve_slot};
pub use host::{ChartHost, LinearHost, x_pixels};
pub use range::range_num;
pub use scale::LinearScale;
pub use series::{FieldIndexMap, OutlierSet, SeriesArray, ValueColumn};
pub use spline::{
    CubicSegment, MonotoneSpline, OVERSHOOT_LIMIT, build_monotone_spline, monotone_tangents,
};
pub use types::{Axis, IndexRange, PixelPoint, PlotBox};
