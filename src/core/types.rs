use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Size of the plotting area in pixels, as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotBox {
    pub width: f64,
    pub height: f64,
}

impl PlotBox {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Named axis used by the host's value-to-pixel transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

/// Inclusive index bounds currently on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexRange {
    pub min: usize,
    pub max: usize,
}

impl IndexRange {
    /// Builds a range, swapping the bounds if they are given in reverse.
    #[must_use]
    pub fn new(min: usize, max: usize) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Clips the range to a series of `len` entries.
    ///
    /// Returns `None` when the series is empty or the range lies past its end.
    #[must_use]
    pub fn clamp_to_len(self, len: usize) -> Option<Self> {
        if len == 0 || self.min >= len {
            return None;
        }
        Some(Self {
            min: self.min,
            max: self.max.min(len - 1),
        })
    }

    #[must_use]
    pub fn indices(self) -> RangeInclusive<usize> {
        self.min..=self.max
    }
}
