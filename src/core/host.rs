use crate::core::{Axis, IndexRange, LinearScale, PlotBox, SeriesArray};
use crate::error::{ChartError, ChartResult};

/// Services the host charting framework provides to a draw pass.
///
/// Everything here may change between frames (zoom, resize), so renderers
/// query it afresh on every pass.
pub trait ChartHost {
    /// Maps a data value onto the pixel space of `axis`. With `clamp` the
    /// result is kept inside the plot box.
    fn value_to_pixel(&self, value: f64, axis: Axis, clamp: bool) -> f64;

    fn plot_box(&self) -> PlotBox;

    fn series(&self) -> &SeriesArray;

    /// Inclusive index bounds currently on screen, `None` when nothing is.
    fn visible_index_range(&self) -> Option<IndexRange>;
}

/// Maps column 0 of the host's series onto x pixels.
#[must_use]
pub fn x_pixels(host: &dyn ChartHost) -> Vec<f64> {
    host.series()
        .x_values()
        .iter()
        .map(|&x| host.value_to_pixel(x, Axis::X, false))
        .collect()
}

/// Headless host backed by two linear scales.
///
/// The x scale maps left to right over the plot width; the y scale is
/// inverted so larger values sit higher on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearHost {
    series: SeriesArray,
    plot_box: PlotBox,
    x_scale: LinearScale,
    y_scale: LinearScale,
    visible: Option<IndexRange>,
}

impl LinearHost {
    pub fn new(
        series: SeriesArray,
        plot_box: PlotBox,
        x_scale: LinearScale,
        y_scale: LinearScale,
    ) -> ChartResult<Self> {
        if !plot_box.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: plot_box.width,
                height: plot_box.height,
            });
        }

        let visible = IndexRange::new(0, series.len().saturating_sub(1)).clamp_to_len(series.len());
        Ok(Self {
            series,
            plot_box,
            x_scale,
            y_scale,
            visible,
        })
    }

    #[must_use]
    pub fn with_visible_range(mut self, min: usize, max: usize) -> Self {
        self.visible = IndexRange::new(min, max).clamp_to_len(self.series.len());
        self
    }

    pub fn set_plot_box(&mut self, plot_box: PlotBox) -> ChartResult<()> {
        if !plot_box.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: plot_box.width,
                height: plot_box.height,
            });
        }
        self.plot_box = plot_box;
        Ok(())
    }

    pub fn set_scales(&mut self, x_scale: LinearScale, y_scale: LinearScale) {
        self.x_scale = x_scale;
        self.y_scale = y_scale;
    }

    #[must_use]
    pub fn x_scale(&self) -> LinearScale {
        self.x_scale
    }

    #[must_use]
    pub fn y_scale(&self) -> LinearScale {
        self.y_scale
    }
}

impl ChartHost for LinearHost {
    fn value_to_pixel(&self, value: f64, axis: Axis, clamp: bool) -> f64 {
        let (pixel, span) = match axis {
            Axis::X => (
                self.x_scale.domain_to_pixel(value, self.plot_box.width),
                self.plot_box.width,
            ),
            Axis::Y => (
                self.plot_box.height - self.y_scale.domain_to_pixel(value, self.plot_box.height),
                self.plot_box.height,
            ),
        };
        if clamp { pixel.clamp(0.0, span) } else { pixel }
    }

    fn plot_box(&self) -> PlotBox {
        self.plot_box
    }

    fn series(&self) -> &SeriesArray {
        &self.series
    }

    fn visible_index_range(&self) -> Option<IndexRange> {
        self.visible
    }
}
