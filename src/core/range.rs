/// Pads a data range for axis display.
///
/// The span is widened by `pad * (max - min)` on each side and rounded
/// outward to a tenth of the span's power of ten. A zero span falls back to
/// the value's magnitude (or `1e3` for all-zero data). With `soft_zero` the
/// padded range never crosses zero when the data itself does not.
///
/// Non-finite bounds are ignored; if both are non-finite the range is
/// `(0, 100)`.
#[must_use]
pub fn range_num(min: f64, max: f64, pad: f64, soft_zero: bool) -> (f64, f64) {
    let (min, max) = match (min.is_finite(), max.is_finite()) {
        (true, true) => (min.min(max), min.max(max)),
        (true, false) => (min, min),
        (false, true) => (max, max),
        (false, false) => return (0.0, 100.0),
    };

    let delta = max - min;
    let scalar_max = min.abs().max(max.abs());
    let non_zero_delta = if delta > 0.0 {
        delta
    } else if scalar_max > 0.0 {
        scalar_max
    } else {
        1e3
    };
    let base = 10f64.powf(non_zero_delta.log10().floor());
    let increment = base / 10.0;

    let pad_for = |bound: f64| {
        if delta > 0.0 {
            non_zero_delta * pad
        } else if bound == 0.0 {
            non_zero_delta * 0.1
        } else {
            non_zero_delta
        }
    };

    let mut low = round_down_to(min - pad_for(min), increment);
    let mut high = round_up_to(max + pad_for(max), increment);

    if soft_zero {
        if min >= 0.0 && low < 0.0 {
            low = 0.0;
        }
        if max <= 0.0 && high > 0.0 {
            high = 0.0;
        }
    }

    if low == 0.0 && high == 0.0 {
        high = 100.0;
    }

    (low, high)
}

fn round_down_to(value: f64, increment: f64) -> f64 {
    round_decimals(round_decimals(value / increment, 9).floor() * increment, 9)
}

fn round_up_to(value: f64, increment: f64) -> f64 {
    round_decimals(round_decimals(value / increment, 9).ceil() * increment, 9)
}

fn round_decimals(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
