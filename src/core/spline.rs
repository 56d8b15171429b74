use serde::{Deserialize, Serialize};

use crate::core::PixelPoint;

/// Tangent-to-secant ratio above which a segment's tangents get rescaled.
pub const OVERSHOOT_LIMIT: f64 = 3.0;

/// One cubic Bezier segment continuing from the previous segment's end.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicSegment {
    pub control1: PixelPoint,
    pub control2: PixelPoint,
    pub end: PixelPoint,
}

/// Monotone cubic path: a start point plus `n - 1` Bezier segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonotoneSpline {
    pub start: PixelPoint,
    pub segments: Vec<CubicSegment>,
    pub tangents: Vec<f64>,
}

impl MonotoneSpline {
    #[must_use]
    pub fn end(&self) -> PixelPoint {
        self.segments.last().map_or(self.start, |segment| segment.end)
    }
}

/// Builds a Fritsch-Carlson style monotone spline through `points`.
///
/// Points must already exclude nulls and be ordered by x. Fewer than two
/// points yield `None`.
#[must_use]
pub fn build_monotone_spline(points: &[PixelPoint]) -> Option<MonotoneSpline> {
    if points.len() < 2 {
        return None;
    }

    let tangents = monotone_tangents(points);
    let segments = points
        .windows(2)
        .zip(tangents.windows(2))
        .map(|(pair, slope)| {
            let (p0, p1) = (pair[0], pair[1]);
            let dx = p1.x - p0.x;
            CubicSegment {
                control1: PixelPoint::new(p0.x + dx / 3.0, p0.y + slope[0] * dx / 3.0),
                control2: PixelPoint::new(p1.x - dx / 3.0, p1.y - slope[1] * dx / 3.0),
                end: p1,
            }
        })
        .collect();

    Some(MonotoneSpline {
        start: points[0],
        segments,
        tangents,
    })
}

/// Per-point tangents after flat-segment flattening and overshoot limiting.
///
/// Segments are corrected left to right, so a tangent shared by two
/// segments sees the correction of the earlier one first.
#[must_use]
pub fn monotone_tangents(points: &[PixelPoint]) -> Vec<f64> {
    let n = points.len();
    if n < 2 {
        return vec![0.0; n];
    }

    let secants: Vec<f64> = points
        .windows(2)
        .map(|pair| {
            let dx = pair[1].x - pair[0].x;
            if dx == 0.0 {
                0.0
            } else {
                (pair[1].y - pair[0].y) / dx
            }
        })
        .collect();

    let mut tangents = Vec::with_capacity(n);
    tangents.push(secants[0]);
    tangents.extend(secants.windows(2).map(|pair| (pair[0] + pair[1]) / 2.0));
    tangents.push(secants[n - 2]);

    for (i, &secant) in secants.iter().enumerate() {
        if secant == 0.0 {
            tangents[i] = 0.0;
            tangents[i + 1] = 0.0;
            continue;
        }

        let a = tangents[i] / secant;
        let b = tangents[i + 1] / secant;
        let h = a.hypot(b);
        if h > OVERSHOOT_LIMIT {
            let scale = OVERSHOOT_LIMIT / h;
            tangents[i] = a * scale * secant;
            tangents[i + 1] = b * scale * secant;
        }
    }

    tangents
}
