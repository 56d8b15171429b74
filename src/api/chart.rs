use std::fmt;

use tracing::{debug, trace};

use crate::core::{ChartHost, FieldIndexMap, SeriesArray};
use crate::error::ChartResult;
use crate::extensions::{GlyphPlugin, HostOptions};
use crate::render::{DrawSurface, SurfaceGuard};

/// Registered glyph plugins plus the host options they produced.
///
/// Plugins configure once, in registration order, when the chart is built;
/// every repaint then runs their draw hooks in that same order.
pub struct GlyphChart {
    plugins: Vec<Box<dyn GlyphPlugin>>,
    options: HostOptions,
    fields: FieldIndexMap,
}

impl GlyphChart {
    pub fn new(
        series: &SeriesArray,
        fields: FieldIndexMap,
        plugins: Vec<Box<dyn GlyphPlugin>>,
    ) -> ChartResult<Self> {
        fields.validate_for(series)?;

        let mut options = HostOptions::for_columns(series.column_count());
        for plugin in &plugins {
            plugin.configure(&mut options);
            debug!(plugin = plugin.id(), "glyph plugin configured");
        }

        Ok(Self {
            plugins,
            options,
            fields,
        })
    }

    #[must_use]
    pub fn options(&self) -> &HostOptions {
        &self.options
    }

    #[must_use]
    pub fn fields(&self) -> &FieldIndexMap {
        &self.fields
    }

    pub fn plugin_ids(&self) -> impl Iterator<Item = &str> {
        self.plugins.iter().map(|plugin| plugin.id())
    }

    /// Y axis range for the given data bounds; a plugin-registered range
    /// contributor takes precedence over the raw bounds.
    #[must_use]
    pub fn y_range(&self, series: &SeriesArray, data_min: f64, data_max: f64) -> (f64, f64) {
        match &self.options.y_range {
            Some(auto_range) => auto_range.range(series, data_min, data_max),
            None => (data_min, data_max),
        }
    }

    /// Runs every draw hook, each inside its own surface scope.
    pub fn draw_frame(&self, host: &dyn ChartHost, surface: &mut dyn DrawSurface) {
        for plugin in &self.plugins {
            let mut scope = SurfaceGuard::new(&mut *surface);
            plugin.draw(host, &mut *scope);
        }
        trace!(plugins = self.plugins.len(), "glyph frame drawn");
    }
}

impl fmt::Debug for GlyphChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlyphChart")
            .field("plugins", &self.plugin_ids().collect::<Vec<_>>())
            .field("options", &self.options)
            .field("fields", &self.fields)
            .finish()
    }
}
