use crate::core::{
    LogTimeScale, MetricScale, PlotPoint, SmoothPath, StoryDataset, StoryMetric,
    smooth_path_with_factor,
};
use crate::error::ChartResult;

/// Projects one metric of every dataset row into plot space.
///
/// Deterministic and side-effect free so rendering and tests consume the
/// exact same geometry.
#[must_use]
pub fn project_metric_points(
    dataset: &StoryDataset,
    metric: StoryMetric,
    time_scale: LogTimeScale,
    metric_scale: MetricScale,
    plot_width: f64,
) -> Vec<PlotPoint> {
    dataset
        .rows()
        .iter()
        .map(|row| {
            PlotPoint::new(
                time_scale.time_to_plot_x(row.t, plot_width),
                metric_scale.value_to_plot_y(row.metric(metric)),
            )
        })
        .collect()
}

/// Projects `metric` and smooths it into a bezier trend curve.
pub fn project_metric_curve(
    dataset: &StoryDataset,
    metric: StoryMetric,
    time_scale: LogTimeScale,
    metric_scale: MetricScale,
    plot_width: f64,
    smoothing_factor: f64,
) -> ChartResult<SmoothPath> {
    let points = project_metric_points(dataset, metric, time_scale, metric_scale, plot_width);
    smooth_path_with_factor(&points, smoothing_factor)
}
