use serde::{Deserialize, Serialize};

use crate::core::{
    BOUNCE_SCALE_MAX, CONVERSION_SCALE_MAX, SMOOTHING_FACTOR, STORY_PLOT_HEIGHT,
    STORY_PLOT_TOP_MARGIN, Viewport,
};
use crate::error::{ChartError, ChartResult};

/// Public engine bootstrap configuration.
///
/// Every field has a serde default, so `{}` is a valid config and reproduces
/// the shipped chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StoryEngineConfig {
    #[serde(default = "default_viewport")]
    pub viewport: Viewport,
    #[serde(default = "default_plot_top_margin")]
    pub plot_top_margin: f64,
    #[serde(default = "default_plot_height")]
    pub plot_height: f64,
    #[serde(default = "default_conversion_scale_max")]
    pub conversion_scale_max: f64,
    #[serde(default = "default_bounce_scale_max")]
    pub bounce_scale_max: f64,
    #[serde(default = "default_smoothing_factor")]
    pub smoothing_factor: f64,
    /// Overrides the seed row of the loaded tables.
    #[serde(default)]
    pub seed_index: Option<usize>,
}

impl Default for StoryEngineConfig {
    fn default() -> Self {
        Self {
            viewport: default_viewport(),
            plot_top_margin: default_plot_top_margin(),
            plot_height: default_plot_height(),
            conversion_scale_max: default_conversion_scale_max(),
            bounce_scale_max: default_bounce_scale_max(),
            smoothing_factor: default_smoothing_factor(),
            seed_index: None,
        }
    }
}

impl StoryEngineConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    /// Sets the vertical plot band: `top_margin .. top_margin + height`.
    #[must_use]
    pub fn with_plot_band(mut self, top_margin: f64, height: f64) -> Self {
        self.plot_top_margin = top_margin;
        self.plot_height = height;
        self
    }

    #[must_use]
    pub fn with_conversion_scale_max(mut self, scale_max: f64) -> Self {
        self.conversion_scale_max = scale_max;
        self
    }

    #[must_use]
    pub fn with_bounce_scale_max(mut self, scale_max: f64) -> Self {
        self.bounce_scale_max = scale_max;
        self
    }

    #[must_use]
    pub fn with_smoothing_factor(mut self, factor: f64) -> Self {
        self.smoothing_factor = factor;
        self
    }

    #[must_use]
    pub fn with_seed_index(mut self, seed_index: usize) -> Self {
        self.seed_index = Some(seed_index);
        self
    }

    pub fn validate(self) -> ChartResult<Self> {
        self.viewport.validate()?;
        if !self.plot_top_margin.is_finite() || self.plot_top_margin < 0.0 {
            return Err(ChartError::InvalidData(
                "plot top margin must be finite and >= 0".to_owned(),
            ));
        }
        if !self.plot_height.is_finite() || self.plot_height <= 0.0 {
            return Err(ChartError::InvalidData(
                "plot height must be finite and > 0".to_owned(),
            ));
        }
        if self.plot_top_margin + self.plot_height > self.viewport.plot_height() {
            return Err(ChartError::InvalidData(format!(
                "plot band {}..{} does not fit a viewport of height {}",
                self.plot_top_margin,
                self.plot_top_margin + self.plot_height,
                self.viewport.height
            )));
        }
        for (name, value) in [
            ("conversion", self.conversion_scale_max),
            ("bounce", self.bounce_scale_max),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "{name} scale max must be finite and > 0"
                )));
            }
        }
        if !self.smoothing_factor.is_finite() || self.smoothing_factor < 0.0 {
            return Err(ChartError::InvalidData(
                "smoothing factor must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }

    pub fn to_json_pretty(self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Parses and validates a config document.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))?;
        config.validate()
    }
}

fn default_viewport() -> Viewport {
    Viewport::new(1000, 500)
}

fn default_plot_top_margin() -> f64 {
    STORY_PLOT_TOP_MARGIN
}

fn default_plot_height() -> f64 {
    STORY_PLOT_HEIGHT
}

fn default_conversion_scale_max() -> f64 {
    CONVERSION_SCALE_MAX
}

fn default_bounce_scale_max() -> f64 {
    BOUNCE_SCALE_MAX
}

fn default_smoothing_factor() -> f64 {
    SMOOTHING_FACTOR
}
