use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Maps a load time onto a logarithmic plot axis of `plot_width` units.
///
/// `min_t` maps to `0` and `max_t` maps to `plot_width`. Values outside the
/// domain extrapolate; callers clamp. Requires `min_t > 0`.
#[must_use]
pub fn domain_to_plot_x(t: f64, min_t: f64, max_t: f64, plot_width: f64) -> f64 {
    let min_log = min_t.log10();
    let log_range = max_t.log10() - min_log;
    (t.log10() - min_log) / log_range * plot_width
}

/// Exact inverse of [`domain_to_plot_x`].
#[must_use]
pub fn plot_x_to_domain(x: f64, min_t: f64, max_t: f64, plot_width: f64) -> f64 {
    let min_log = min_t.log10();
    let log_range = max_t.log10() - min_log;
    10f64.powf((x / plot_width) * log_range + min_log)
}

/// Validated logarithmic time axis.
///
/// Construction rejects non-positive or inverted bounds so the mapping
/// methods never have to fail while handling pointer events.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogTimeScale {
    min_t: f64,
    max_t: f64,
}

impl LogTimeScale {
    pub fn new(min_t: f64, max_t: f64) -> ChartResult<Self> {
        if !min_t.is_finite() || !max_t.is_finite() || min_t <= 0.0 || max_t <= min_t {
            return Err(ChartError::InvalidDomain {
                min: min_t,
                max: max_t,
            });
        }
        Ok(Self { min_t, max_t })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.min_t, self.max_t)
    }

    #[must_use]
    pub fn min_t(self) -> f64 {
        self.min_t
    }

    #[must_use]
    pub fn max_t(self) -> f64 {
        self.max_t
    }

    #[must_use]
    pub fn time_to_plot_x(self, t: f64, plot_width: f64) -> f64 {
        domain_to_plot_x(t, self.min_t, self.max_t, plot_width)
    }

    #[must_use]
    pub fn plot_x_to_time(self, x: f64, plot_width: f64) -> f64 {
        plot_x_to_domain(x, self.min_t, self.max_t, plot_width)
    }

    /// Clamps `t` into the scale domain. NaN collapses to `min_t`.
    #[must_use]
    pub fn clamp_time(self, t: f64) -> f64 {
        if t.is_nan() {
            return self.min_t;
        }
        t.clamp(self.min_t, self.max_t)
    }
}
