pub mod curve;
pub mod dataset;
pub mod interpolation;
pub mod log_scale;
pub mod metric_scale;
pub mod primitives;
pub mod smoothing;
pub mod tables;
pub mod template;
pub mod types;
pub mod zones;

pub use curve::{project_metric_curve, project_metric_points};
pub use dataset::{StoryDataset, StoryMetric, StoryRow};
pub use interpolation::{
    InterpolatedRow, StoryInterpolator, bracket_ratio, classify_pointer, interpolate_at_pointer,
    pointer_to_plot_x,
};
pub use log_scale::{LogTimeScale, domain_to_plot_x, plot_x_to_domain};
pub use metric_scale::{
    BOUNCE_SCALE_MAX, CONVERSION_SCALE_MAX, MetricScale, STORY_PLOT_HEIGHT,
    STORY_PLOT_TOP_MARGIN, metric_to_plot_y,
};
pub use smoothing::{
    CubicSegment, PathCommand, SMOOTHING_FACTOR, SmoothPath, smooth_path, smooth_path_with_factor,
    svg_path_data,
};
pub use tables::{CATCH_ALL_MAX_T, PERFORMANCE_STORY_SEED_INDEX, StoryTables};
pub use template::{Placeholder, placeholder_values, render_template};
pub use types::{ContainerRect, PlotPoint, Viewport};
pub use zones::{Zone, ZoneTable, ZoneTone};
