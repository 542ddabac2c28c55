use tracing::{debug, warn};

use crate::core::{
    LogTimeScale, MetricScale, StoryInterpolator, StoryMetric, StoryTables, project_metric_curve,
};
use crate::error::ChartResult;
use crate::interaction::InteractionState;
use crate::render::Renderer;

use super::{StoryEngine, StoryEngineConfig};

impl<R: Renderer> StoryEngine<R> {
    /// Creates an engine over the built-in performance story tables.
    pub fn new(renderer: R, config: StoryEngineConfig) -> ChartResult<Self> {
        Self::with_tables(renderer, config, StoryTables::performance_story()?)
    }

    /// Creates an engine over caller-provided tables.
    ///
    /// A `seed_index` set on the config replaces the tables' own seed row.
    pub fn with_tables(
        renderer: R,
        config: StoryEngineConfig,
        mut tables: StoryTables,
    ) -> ChartResult<Self> {
        let config = config.validate()?;
        if let Some(seed_index) = config.seed_index {
            tables.seed_index = seed_index;
        }
        let tables = tables.validate()?;
        let plot_width = config.viewport.plot_width();

        let dataset = &tables.dataset;
        let time_scale = LogTimeScale::new(dataset.min_t(), dataset.max_t())?;
        let conversion_scale = MetricScale::new(
            config.conversion_scale_max,
            config.plot_height,
            config.plot_top_margin,
        )?;
        let bounce_scale = MetricScale::new(
            config.bounce_scale_max,
            config.plot_height,
            config.plot_top_margin,
        )?;

        for (metric, scale) in [
            (StoryMetric::ConversionRate, conversion_scale),
            (StoryMetric::BounceRate, bounce_scale),
        ] {
            let (min, max) = dataset.metric_extent(metric);
            if !scale.contains(min) || !scale.contains(max) {
                warn!(
                    ?metric,
                    min,
                    max,
                    scale_max = scale.scale_max(),
                    "metric extent exceeds its axis; curve will leave the plot band"
                );
            }
        }

        let conversion_curve = project_metric_curve(
            dataset,
            StoryMetric::ConversionRate,
            time_scale,
            conversion_scale,
            plot_width,
            config.smoothing_factor,
        )?;
        let bounce_curve = project_metric_curve(
            dataset,
            StoryMetric::BounceRate,
            time_scale,
            bounce_scale,
            plot_width,
            config.smoothing_factor,
        )?;

        let seed = StoryInterpolator::new(dataset, plot_width)?.at_row(tables.seed_index)?;
        let seed_zone_index = tables.zones.classify_index(seed.t());

        debug!(
            rows = dataset.len(),
            zones = tables.zones.len(),
            min_t = dataset.min_t(),
            max_t = dataset.max_t(),
            seed_index = tables.seed_index,
            seed_zone = %tables.zones.zones()[seed_zone_index].id,
            "story engine initialized"
        );

        Ok(Self {
            renderer,
            config,
            time_scale,
            conversion_scale,
            bounce_scale,
            conversion_curve,
            bounce_curve,
            interaction: InteractionState::new(seed, seed_zone_index),
            tables,
        })
    }
}
