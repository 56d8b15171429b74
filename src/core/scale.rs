use crate::error::{ChartError, ChartResult};

/// Linear mapping from a value domain onto a pixel span starting at zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    /// Maps `value` onto `[0, span_px]`; values outside the domain land
    /// outside the span.
    #[must_use]
    pub fn domain_to_pixel(self, value: f64, span_px: f64) -> f64 {
        let span = self.domain_end - self.domain_start;
        let normalized = (value - self.domain_start) / span;
        normalized * span_px
    }
}

#[cfg(test)]
mod tests {
    use super::LinearScale;
    use approx::assert_abs_diff_eq;

    #[test]
    fn scale_rejects_empty_domain() {
        assert!(LinearScale::new(5.0, 5.0).is_err());
        assert!(LinearScale::new(f64::NEG_INFINITY, 5.0).is_err());
    }

    #[test]
    fn scale_maps_domain_linearly() {
        let scale = LinearScale::new(10.0, 20.0).expect("valid scale");
        assert_abs_diff_eq!(scale.domain_to_pixel(10.0, 800.0), 0.0);
        assert_abs_diff_eq!(scale.domain_to_pixel(15.0, 800.0), 400.0);
        assert_abs_diff_eq!(scale.domain_to_pixel(25.0, 800.0), 1200.0);
    }
}
