use serde::{Deserialize, Serialize};

use crate::core::{
    LogTimeScale, MetricScale, PlotPoint, SmoothPath, StoryDataset, StoryInterpolator,
    StoryMetric, StoryTables, Viewport, ZoneTable,
};
use crate::error::{ChartError, ChartResult};
use crate::interaction::InteractionState;
use crate::render::Renderer;

use super::StoryEngineConfig;

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

/// Cursor geometry of the active row in view-box units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StoryCursor {
    pub plot_x: f64,
    pub conversion: PlotPoint,
    pub bounce: PlotPoint,
}

/// Main facade consumed by host applications.
///
/// `StoryEngine` owns the story tables, the log time axis, both metric axes,
/// the cached trend curves and the active-row state, and hands finished
/// frames to its renderer.
pub struct StoryEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: StoryEngineConfig,
    pub(super) tables: StoryTables,
    pub(super) time_scale: LogTimeScale,
    pub(super) conversion_scale: MetricScale,
    pub(super) bounce_scale: MetricScale,
    pub(super) conversion_curve: SmoothPath,
    pub(super) bounce_curve: SmoothPath,
    pub(super) interaction: InteractionState,
}

impl<R: Renderer> StoryEngine<R> {
    #[must_use]
    pub fn config(&self) -> StoryEngineConfig {
        self.config
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.config.viewport
    }

    #[must_use]
    pub fn plot_width(&self) -> f64 {
        self.config.viewport.plot_width()
    }

    #[must_use]
    pub fn tables(&self) -> &StoryTables {
        &self.tables
    }

    #[must_use]
    pub fn dataset(&self) -> &StoryDataset {
        &self.tables.dataset
    }

    #[must_use]
    pub fn zones(&self) -> &ZoneTable {
        &self.tables.zones
    }

    #[must_use]
    pub fn time_scale(&self) -> LogTimeScale {
        self.time_scale
    }

    #[must_use]
    pub fn conversion_scale(&self) -> MetricScale {
        self.conversion_scale
    }

    #[must_use]
    pub fn bounce_scale(&self) -> MetricScale {
        self.bounce_scale
    }

    /// Smoothed trend curve of a plotted metric.
    ///
    /// Only conversion and bounce rates are drawn; other metrics are an
    /// error.
    pub fn curve(&self, metric: StoryMetric) -> ChartResult<&SmoothPath> {
        match metric {
            StoryMetric::ConversionRate => Ok(&self.conversion_curve),
            StoryMetric::BounceRate => Ok(&self.bounce_curve),
            other => Err(ChartError::InvalidData(format!(
                "metric {other:?} has no plotted curve"
            ))),
        }
    }

    #[must_use]
    pub fn conversion_curve(&self) -> &SmoothPath {
        &self.conversion_curve
    }

    #[must_use]
    pub fn bounce_curve(&self) -> &SmoothPath {
        &self.bounce_curve
    }

    pub fn map_time_to_plot_x(&self, t: f64) -> f64 {
        self.time_scale.time_to_plot_x(t, self.plot_width())
    }

    pub fn map_plot_x_to_time(&self, plot_x: f64) -> f64 {
        self.time_scale.plot_x_to_time(plot_x, self.plot_width())
    }

    /// Interpolator over the engine's dataset and plot width.
    pub fn interpolator(&self) -> ChartResult<StoryInterpolator<'_>> {
        StoryInterpolator::new(&self.tables.dataset, self.plot_width())
    }

    /// Cursor line and marker positions for the active row.
    #[must_use]
    pub fn cursor(&self) -> StoryCursor {
        let active = self.interaction.active_row();
        let plot_x = active.plot_x;
        StoryCursor {
            plot_x,
            conversion: PlotPoint::new(
                plot_x,
                self.conversion_scale
                    .value_to_plot_y(active.row.conversion_rate),
            ),
            bounce: PlotPoint::new(
                plot_x,
                self.bounce_scale.value_to_plot_y(active.row.bounce_rate),
            ),
        }
    }

    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.build_render_frame()?;
        self.renderer.render(&frame)
    }

    /// Renders the frame into an external cairo context.
    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(&mut self, context: &cairo::Context) -> ChartResult<()>
    where
        R: CairoContextRenderer,
    {
        let frame = self.build_render_frame()?;
        self.renderer.render_on_cairo_context(context, &frame)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
