use serde::{Deserialize, Serialize};

use crate::core::{ContainerRect, LogTimeScale, StoryDataset, StoryRow, StoryTables, Zone};
use crate::error::{ChartError, ChartResult};

/// Ratios this close to a bracket edge snap onto the sample row.
///
/// The inverse log mapping round-trips with a few ulps of error; without the
/// snap a pointer resting on a grid line would report `0.9999999999` of the
/// way between rows instead of the row itself.
pub const RATIO_SNAP_EPSILON: f64 = 1e-9;

/// Synthetic row produced from a pointer position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterpolatedRow {
    pub row: StoryRow,
    /// Index of the lower bracketing row; the upper one is `lower_index + 1`.
    pub lower_index: usize,
    /// Position between the bracketing rows measured in plot-x space.
    pub ratio: f64,
    pub plot_x: f64,
}

impl InterpolatedRow {
    #[must_use]
    pub fn t(&self) -> f64 {
        self.row.t
    }
}

/// Maps pointer positions and load times onto interpolated story rows.
#[derive(Debug, Clone, Copy)]
pub struct StoryInterpolator<'a> {
    dataset: &'a StoryDataset,
    scale: LogTimeScale,
    plot_width: f64,
}

impl<'a> StoryInterpolator<'a> {
    /// Builds an interpolator whose log domain spans the dataset.
    pub fn new(dataset: &'a StoryDataset, plot_width: f64) -> ChartResult<Self> {
        if !plot_width.is_finite() || plot_width <= 0.0 {
            return Err(ChartError::InvalidData(
                "plot width must be finite and > 0".to_owned(),
            ));
        }
        let scale = LogTimeScale::new(dataset.min_t(), dataset.max_t())?;
        Ok(Self {
            dataset,
            scale,
            plot_width,
        })
    }

    #[must_use]
    pub fn scale(&self) -> LogTimeScale {
        self.scale
    }

    #[must_use]
    pub fn plot_width(&self) -> f64 {
        self.plot_width
    }

    /// Exact copy of `rows[index]`, positioned on its own plot column.
    pub fn at_row(&self, index: usize) -> ChartResult<InterpolatedRow> {
        let row = *self.dataset.get(index).ok_or_else(|| {
            ChartError::InvalidData(format!(
                "row index {index} is out of range for {} rows",
                self.dataset.len()
            ))
        })?;
        let last_pair = self.dataset.len() - 2;
        let (lower_index, ratio) = if index > last_pair {
            (last_pair, 1.0)
        } else {
            (index, 0.0)
        };
        Ok(InterpolatedRow {
            row,
            lower_index,
            ratio,
            plot_x: self.scale.time_to_plot_x(row.t, self.plot_width),
        })
    }

    /// Interpolates at load time `t`, clamped to the dataset bounds.
    #[must_use]
    pub fn at_time(&self, t: f64) -> InterpolatedRow {
        let t = self.scale.clamp_time(t);
        let lower_index = self.dataset.bracket_index(t);
        let rows = self.dataset.rows();
        let (p0, p1) = (&rows[lower_index], &rows[lower_index + 1]);

        let x = self.scale.time_to_plot_x(t, self.plot_width);
        let x0 = self.scale.time_to_plot_x(p0.t, self.plot_width);
        let x1 = self.scale.time_to_plot_x(p1.t, self.plot_width);
        let ratio = bracket_ratio(x, x0, x1);

        let (ratio, t) = if ratio <= RATIO_SNAP_EPSILON {
            (0.0, p0.t)
        } else if ratio >= 1.0 - RATIO_SNAP_EPSILON {
            (1.0, p1.t)
        } else {
            (ratio, t)
        };

        InterpolatedRow {
            row: p0.lerp(p1, ratio, t),
            lower_index,
            ratio,
            plot_x: self.scale.time_to_plot_x(t, self.plot_width),
        }
    }

    /// Interpolates at a plot-space x coordinate, clamped to the plot width.
    #[must_use]
    pub fn at_plot_x(&self, plot_x: f64) -> InterpolatedRow {
        let plot_x = if plot_x.is_nan() {
            0.0
        } else {
            plot_x.clamp(0.0, self.plot_width)
        };
        self.at_time(self.scale.plot_x_to_time(plot_x, self.plot_width))
    }

    /// Interpolates at a client pointer position over `rect`.
    pub fn at_pointer(&self, client_x: f64, rect: ContainerRect) -> ChartResult<InterpolatedRow> {
        let plot_x = pointer_to_plot_x(client_x, rect, self.plot_width)?;
        Ok(self.at_plot_x(plot_x))
    }
}

/// Converts a client x coordinate into plot space.
///
/// The offset inside the container is clamped to `[0, rect.width]` before
/// scaling onto `[0, plot_width]`.
pub fn pointer_to_plot_x(client_x: f64, rect: ContainerRect, plot_width: f64) -> ChartResult<f64> {
    if !client_x.is_finite() {
        return Err(ChartError::InvalidData(
            "pointer x must be finite".to_owned(),
        ));
    }
    let rect = rect.validate()?;
    Ok(rect.clamped_offset_x(client_x) / rect.width * plot_width)
}

/// One-shot pointer interpolation over `dataset`.
pub fn interpolate_at_pointer(
    client_x: f64,
    rect: ContainerRect,
    dataset: &StoryDataset,
    plot_width: f64,
) -> ChartResult<InterpolatedRow> {
    StoryInterpolator::new(dataset, plot_width)?.at_pointer(client_x, rect)
}

/// One-shot pointer step over `tables`: the interpolated row and the zone
/// its load time falls in.
pub fn classify_pointer(
    client_x: f64,
    rect: ContainerRect,
    tables: &StoryTables,
    plot_width: f64,
) -> ChartResult<(InterpolatedRow, &Zone)> {
    let row = interpolate_at_pointer(client_x, rect, &tables.dataset, plot_width)?;
    Ok((row, tables.zones.classify(row.t())))
}

/// Position of `x` between `x0` and `x1`, clamped to `[0, 1]`.
///
/// A zero-width bracket yields `0` rather than dividing by zero.
#[must_use]
pub fn bracket_ratio(x: f64, x0: f64, x1: f64) -> f64 {
    let span = x1 - x0;
    if span == 0.0 {
        return 0.0;
    }
    let ratio = (x - x0) / span;
    if ratio.is_nan() {
        return 0.0;
    }
    ratio.clamp(0.0, 1.0)
}
