use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// One sample of the load-time story.
///
/// Metrics are percentages except `estimated_sales` (sales per 1k visits).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryRow {
    /// Load time in seconds.
    pub t: f64,
    pub conversion_rate: f64,
    pub bounce_rate: f64,
    /// Conversion relative to the 1s baseline (baseline = 100).
    pub relative_conversion: f64,
    /// Conversions lost vs. the 1s baseline; negative means a gain.
    pub loss_percent: f64,
    pub estimated_sales: f64,
    /// Bounce increase vs. the 1s baseline.
    pub bounce_delta_vs_baseline: f64,
}

impl StoryRow {
    #[must_use]
    pub const fn new(
        t: f64,
        conversion_rate: f64,
        bounce_rate: f64,
        relative_conversion: f64,
        loss_percent: f64,
        estimated_sales: f64,
        bounce_delta_vs_baseline: f64,
    ) -> Self {
        Self {
            t,
            conversion_rate,
            bounce_rate,
            relative_conversion,
            loss_percent,
            estimated_sales,
            bounce_delta_vs_baseline,
        }
    }

    /// Linearly interpolates every metric by `ratio` and stamps the result
    /// with `t`. `t` itself is not interpolated: it comes from the pointer.
    ///
    /// Ratios `0` and `1` return the endpoint metrics bit for bit.
    #[must_use]
    pub fn lerp(&self, other: &Self, ratio: f64, t: f64) -> Self {
        let mix = |a: f64, b: f64| a * (1.0 - ratio) + b * ratio;
        Self {
            t,
            conversion_rate: mix(self.conversion_rate, other.conversion_rate),
            bounce_rate: mix(self.bounce_rate, other.bounce_rate),
            relative_conversion: mix(self.relative_conversion, other.relative_conversion),
            loss_percent: mix(self.loss_percent, other.loss_percent),
            estimated_sales: mix(self.estimated_sales, other.estimated_sales),
            bounce_delta_vs_baseline: mix(
                self.bounce_delta_vs_baseline,
                other.bounce_delta_vs_baseline,
            ),
        }
    }

    #[must_use]
    pub fn metric(&self, metric: StoryMetric) -> f64 {
        match metric {
            StoryMetric::ConversionRate => self.conversion_rate,
            StoryMetric::BounceRate => self.bounce_rate,
            StoryMetric::RelativeConversion => self.relative_conversion,
            StoryMetric::LossPercent => self.loss_percent,
            StoryMetric::EstimatedSales => self.estimated_sales,
            StoryMetric::BounceDeltaVsBaseline => self.bounce_delta_vs_baseline,
        }
    }

    fn is_finite(&self) -> bool {
        self.t.is_finite() && StoryMetric::ALL.iter().all(|m| self.metric(*m).is_finite())
    }
}

/// Dependent metric carried by every [`StoryRow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StoryMetric {
    ConversionRate,
    BounceRate,
    RelativeConversion,
    LossPercent,
    EstimatedSales,
    BounceDeltaVsBaseline,
}

impl StoryMetric {
    pub const ALL: [Self; 6] = [
        Self::ConversionRate,
        Self::BounceRate,
        Self::RelativeConversion,
        Self::LossPercent,
        Self::EstimatedSales,
        Self::BounceDeltaVsBaseline,
    ];
}

/// Immutable, validated story dataset ordered by strictly increasing `t`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<StoryRow>", into = "Vec<StoryRow>")]
pub struct StoryDataset {
    rows: Vec<StoryRow>,
}

impl StoryDataset {
    /// Validates row count, finiteness, positivity and ordering.
    pub fn new(rows: Vec<StoryRow>) -> ChartResult<Self> {
        if rows.len() < 2 {
            return Err(ChartError::InvalidData(format!(
                "story dataset needs at least two rows, got {}",
                rows.len()
            )));
        }
        if let Some(index) = rows.iter().position(|row| !row.is_finite()) {
            return Err(ChartError::InvalidData(format!(
                "story row {index} contains non-finite values"
            )));
        }
        if rows[0].t <= 0.0 {
            return Err(ChartError::InvalidDomain {
                min: rows[0].t,
                max: rows[rows.len() - 1].t,
            });
        }
        if let Some(index) = rows.windows(2).position(|pair| pair[1].t <= pair[0].t) {
            return Err(ChartError::InvalidData(format!(
                "story rows must have strictly increasing t (rows {index} and {})",
                index + 1
            )));
        }

        Ok(Self { rows })
    }

    #[must_use]
    pub fn rows(&self) -> &[StoryRow] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always `false`; kept for API symmetry with slices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&StoryRow> {
        self.rows.get(index)
    }

    #[must_use]
    pub fn min_t(&self) -> f64 {
        self.rows[0].t
    }

    #[must_use]
    pub fn max_t(&self) -> f64 {
        self.rows[self.rows.len() - 1].t
    }

    /// Index `i` of the bracketing pair `(rows[i], rows[i + 1])` for `t`.
    ///
    /// Times past the last row bracket with the last two rows; times before
    /// the first row bracket with the first two.
    #[must_use]
    pub fn bracket_index(&self, t: f64) -> usize {
        let upper_candidates = &self.rows[1..];
        upper_candidates
            .partition_point(|row| row.t < t)
            .min(self.rows.len() - 2)
    }

    /// Smallest and largest value of `metric` across all rows.
    #[must_use]
    pub fn metric_extent(&self, metric: StoryMetric) -> (f64, f64) {
        let values = self.rows.iter().map(|row| OrderedFloat(row.metric(metric)));
        let min = values.clone().min().map_or(0.0, |v| v.0);
        let max = values.max().map_or(0.0, |v| v.0);
        (min, max)
    }
}

impl TryFrom<Vec<StoryRow>> for StoryDataset {
    type Error = ChartError;

    fn try_from(rows: Vec<StoryRow>) -> ChartResult<Self> {
        Self::new(rows)
    }
}

impl From<StoryDataset> for Vec<StoryRow> {
    fn from(dataset: StoryDataset) -> Self {
        dataset.rows
    }
}
