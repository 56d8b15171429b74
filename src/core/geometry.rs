use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Horizontal sizing rules shared by every slot-based glyph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotParams {
    /// Pixels removed from the neighbor spacing before scaling.
    pub gap: f64,
    /// Fraction of the remaining spacing the glyph occupies.
    pub width_factor: f64,
    /// When `true` the glyph's left edge sits on the x pixel instead of
    /// being centered on it.
    pub align_to_tick: bool,
}

impl Default for SlotParams {
    fn default() -> Self {
        Self {
            gap: 2.0,
            width_factor: 1.0,
            align_to_tick: false,
        }
    }
}

impl SlotParams {
    #[must_use]
    pub fn new(gap: f64, width_factor: f64, align_to_tick: bool) -> Self {
        Self {
            gap,
            width_factor,
            align_to_tick,
        }
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.gap.is_finite() || self.gap < 0.0 {
            return Err(ChartError::InvalidData(
                "slot gap must be finite and >= 0".to_owned(),
            ));
        }
        if !self.width_factor.is_finite() || self.width_factor <= 0.0 {
            return Err(ChartError::InvalidData(
                "slot width factor must be finite and > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Pixel geometry of the glyph occupying one index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlotGeometry {
    pub slot_width: f64,
    pub left: f64,
    pub center: f64,
}

impl SlotGeometry {
    #[must_use]
    pub fn right(self) -> f64 {
        self.left + self.slot_width
    }
}

/// Resolves the slot geometry at `index` from the x pixels of every index.
///
/// The available spacing is the distance to the nearest neighbor pixel; a
/// lone data point gets the whole plot width minus a gap on each side. The
/// resulting width never drops below one pixel.
///
/// Returns `None` when `index` is out of range or its pixel is not finite.
#[must_use]
pub fn resolve_slot(
    x_pixels: &[f64],
    index: usize,
    plot_width: f64,
    params: SlotParams,
) -> Option<SlotGeometry> {
    let x = *x_pixels.get(index)?;
    if !x.is_finite() {
        return None;
    }

    let raw_width = if x_pixels.len() == 1 {
        (plot_width - params.gap * 2.0) * params.width_factor
    } else {
        let previous = index
            .checked_sub(1)
            .and_then(|prev| x_pixels.get(prev))
            .map(|prev| (x - prev).abs());
        let next = x_pixels.get(index + 1).map(|next| (next - x).abs());
        let spacing = previous
            .into_iter()
            .chain(next)
            .filter(|distance| distance.is_finite())
            .reduce(f64::min)
            .unwrap_or(plot_width / x_pixels.len() as f64);
        (spacing - params.gap) * params.width_factor
    };

    let slot_width = floor_slot_width(raw_width);
    let left = if params.align_to_tick {
        x
    } else {
        x - slot_width / 2.0
    };

    Some(SlotGeometry {
        slot_width,
        left,
        center: left + slot_width / 2.0,
    })
}

fn floor_slot_width(raw: f64) -> f64 {
    if raw.is_finite() && raw > 1.0 { raw } else { 1.0 }
}
