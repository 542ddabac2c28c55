use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Conversion-rate axis ceiling used by the performance story (percent).
pub const CONVERSION_SCALE_MAX: f64 = 3.5;
/// Bounce-rate axis ceiling used by the performance story (percent).
pub const BOUNCE_SCALE_MAX: f64 = 65.0;
/// Top margin of the plot band inside the 1000x500 view box.
pub const STORY_PLOT_TOP_MARGIN: f64 = 20.0;
/// Height of the plot band; the baseline sits at `20 + 460 = 480`.
pub const STORY_PLOT_HEIGHT: f64 = 460.0;

/// Linear metric-to-Y mapping with an inverted Y axis.
///
/// `0` lands on the baseline `top_margin + plot_height` and `scale_max` on
/// `top_margin`. Values outside `[0, scale_max]` are not clamped and plot
/// outside the band.
#[must_use]
pub fn metric_to_plot_y(value: f64, scale_max: f64, plot_height: f64, top_margin: f64) -> f64 {
    top_margin + plot_height - (value / scale_max) * plot_height
}

/// Validated per-metric Y axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricScale {
    scale_max: f64,
    plot_height: f64,
    top_margin: f64,
}

impl MetricScale {
    pub fn new(scale_max: f64, plot_height: f64, top_margin: f64) -> ChartResult<Self> {
        if !scale_max.is_finite() || scale_max <= 0.0 {
            return Err(ChartError::InvalidData(
                "metric scale max must be finite and > 0".to_owned(),
            ));
        }
        if !plot_height.is_finite() || plot_height <= 0.0 {
            return Err(ChartError::InvalidData(
                "metric plot height must be finite and > 0".to_owned(),
            ));
        }
        if !top_margin.is_finite() {
            return Err(ChartError::InvalidData(
                "metric top margin must be finite".to_owned(),
            ));
        }

        Ok(Self {
            scale_max,
            plot_height,
            top_margin,
        })
    }

    #[must_use]
    pub fn scale_max(self) -> f64 {
        self.scale_max
    }

    /// Y coordinate of the zero line.
    #[must_use]
    pub fn baseline_y(self) -> f64 {
        self.top_margin + self.plot_height
    }

    #[must_use]
    pub fn top_y(self) -> f64 {
        self.top_margin
    }

    #[must_use]
    pub fn value_to_plot_y(self, value: f64) -> f64 {
        metric_to_plot_y(value, self.scale_max, self.plot_height, self.top_margin)
    }

    #[must_use]
    pub fn plot_y_to_value(self, y: f64) -> f64 {
        (self.baseline_y() - y) / self.plot_height * self.scale_max
    }

    /// Returns `true` when `value` plots inside the band.
    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        (0.0..=self.scale_max).contains(&value)
    }
}
