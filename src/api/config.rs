use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{FieldIndexMap, SeriesArray};
use crate::error::{ChartError, ChartResult};
use crate::extensions::{
    BoxGlyphPlugin, BoxGlyphStyle, DurationBarPlugin, DurationBarStyle, GlyphPlugin,
    IndicatorSpec, OverlaySpec, SeriesDecorations,
};

use super::GlyphChart;

/// Glyph family drawn by a chart, with its style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GlyphKind {
    DurationBars(DurationBarStyle),
    BoxGlyphs(BoxGlyphStyle),
}

impl Default for GlyphKind {
    fn default() -> Self {
        Self::DurationBars(DurationBarStyle::default())
    }
}

/// Serializable description of one glyph chart.
///
/// `fields` names the value columns in order (`fields[0]` is column 1);
/// overlays and indicators refer to columns through those names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlyphChartConfig {
    #[serde(default)]
    pub glyphs: GlyphKind,
    #[serde(default)]
    pub fields: Vec<String>,
    #[serde(default)]
    pub overlays: Vec<OverlaySpec>,
    #[serde(default)]
    pub indicators: Vec<IndicatorSpec>,
}

impl GlyphChartConfig {
    #[must_use]
    pub fn new(glyphs: GlyphKind) -> Self {
        Self {
            glyphs,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_fields<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = names.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_overlay(mut self, overlay: OverlaySpec) -> Self {
        self.overlays.push(overlay);
        self
    }

    #[must_use]
    pub fn with_indicator(mut self, indicator: IndicatorSpec) -> Self {
        self.indicators.push(indicator);
        self
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidConfig(format!("failed to serialize glyph chart config: {e}"))
        })
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidConfig(format!("failed to parse glyph chart config: {e}"))
        })
    }

    #[must_use]
    pub fn field_map(&self) -> FieldIndexMap {
        FieldIndexMap::from_value_fields(self.fields.iter().cloned())
    }

    /// Validates the styles and returns the configured plugin with its
    /// overlays and indicators attached.
    pub fn build_plugin(&self) -> ChartResult<Box<dyn GlyphPlugin>> {
        let decorations = SeriesDecorations::new(
            self.overlays.clone(),
            self.indicators.clone(),
            &self.field_map(),
        )?;

        let plugin: Box<dyn GlyphPlugin> = match &self.glyphs {
            GlyphKind::DurationBars(style) => {
                Box::new(DurationBarPlugin::new(*style)?.with_decorations(decorations))
            }
            GlyphKind::BoxGlyphs(style) => {
                Box::new(BoxGlyphPlugin::new(style.clone())?.with_decorations(decorations))
            }
        };
        Ok(plugin)
    }

    pub fn build_chart(&self, series: &SeriesArray) -> ChartResult<GlyphChart> {
        let plugin = self.build_plugin()?;
        debug!(
            plugin = plugin.id(),
            fields = self.fields.len(),
            "building glyph chart from config"
        );
        GlyphChart::new(series, self.field_map(), vec![plugin])
    }
}
