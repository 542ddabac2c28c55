//! "Speed = revenue" widget: three coloured bands that highlight whichever
//! one the pointer is over and dim the others.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use crate::core::{CATCH_ALL_MAX_T, ContainerRect, pointer_to_plot_x};
use crate::error::{ChartError, ChartResult};

/// View-box width the band bounds are expressed in.
pub const SPEED_REVENUE_VIEW_BOX_WIDTH: f64 = 1000.0;

const ACTIVE_OPACITY: f64 = 1.0;
const DIMMED_OPACITY: f64 = 0.2;
const DIMMED_CONTEXT_OPACITY: f64 = 0.3;
const ACTIVE_STROKE_WIDTH: f64 = 5.0;
const IDLE_STROKE_WIDTH: f64 = 3.0;
const ACTIVE_MARKER_RADIUS: f64 = 6.0;
const IDLE_MARKER_RADIUS: f64 = 4.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmphasisBand {
    pub id: String,
    /// Exclusive upper bound in view-box units.
    pub max_plot_x: f64,
    pub range_label: String,
    pub caption: String,
    pub cursor_label: String,
    pub annotation: String,
}

impl EmphasisBand {
    #[must_use]
    pub fn new(id: impl Into<String>, max_plot_x: f64) -> Self {
        Self {
            id: id.into(),
            max_plot_x,
            range_label: String::new(),
            caption: String::new(),
            cursor_label: String::new(),
            annotation: String::new(),
        }
    }

    #[must_use]
    pub fn with_context(
        mut self,
        range_label: impl Into<String>,
        caption: impl Into<String>,
    ) -> Self {
        self.range_label = range_label.into();
        self.caption = caption.into();
        self
    }

    #[must_use]
    pub fn with_cursor_label(mut self, cursor_label: impl Into<String>) -> Self {
        self.cursor_label = cursor_label.into();
        self
    }

    #[must_use]
    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = annotation.into();
        self
    }
}

/// Ordered band list; the last band catches everything past the others.
#[derive(Debug, Clone, PartialEq)]
pub struct EmphasisBands {
    bands: SmallVec<[EmphasisBand; 3]>,
    view_box_width: f64,
}

impl EmphasisBands {
    pub fn new(bands: Vec<EmphasisBand>, view_box_width: f64) -> ChartResult<Self> {
        if bands.is_empty() {
            return Err(ChartError::InvalidData(
                "emphasis bands must not be empty".to_owned(),
            ));
        }
        if !view_box_width.is_finite() || view_box_width <= 0.0 {
            return Err(ChartError::InvalidData(
                "emphasis view box width must be finite and > 0".to_owned(),
            ));
        }
        if bands
            .windows(2)
            .any(|pair| pair[1].max_plot_x.is_nan() || pair[1].max_plot_x <= pair[0].max_plot_x)
        {
            return Err(ChartError::InvalidData(
                "emphasis band bounds must be strictly ascending".to_owned(),
            ));
        }

        Ok(Self {
            bands: SmallVec::from_vec(bands),
            view_box_width,
        })
    }

    /// Fast / risky / slow bands of the speed-revenue chart.
    ///
    /// Bounds follow the hand-drawn curve (2s at x=157, 4s at x=368), not the
    /// log axis of the performance story.
    pub fn speed_revenue() -> ChartResult<Self> {
        Self::new(
            vec![
                EmphasisBand::new("fast", 157.0)
                    .with_context("0.5s – 2.0s", "Lean images, minimal JS, static shell")
                    .with_cursor_label("Good")
                    .with_annotation(
                        "Benchmark: 1s pages convert ≈3× better than 5s pages (Portent).",
                    ),
                EmphasisBand::new("risky", 368.0)
                    .with_context("2.0s – 4.0s", "Heavy hero media, layout thrash")
                    .with_cursor_label("Needs Work")
                    .with_annotation("Every extra second (0–5s) drops conversion by ≈4.4%."),
                EmphasisBand::new("slow", CATCH_ALL_MAX_T)
                    .with_context("4.0s+", "Bloated bundles, blocking tags")
                    .with_cursor_label("Critical")
                    .with_annotation("Bounce probability increases ~90% vs 1s (Google)."),
            ],
            SPEED_REVENUE_VIEW_BOX_WIDTH,
        )
    }

    #[must_use]
    pub fn bands(&self) -> &[EmphasisBand] {
        &self.bands
    }

    #[must_use]
    pub fn view_box_width(&self) -> f64 {
        self.view_box_width
    }

    /// Index of the first band with `plot_x < max_plot_x`, else the last.
    #[must_use]
    pub fn classify_plot_x(&self, plot_x: f64) -> usize {
        self.bands
            .iter()
            .position(|band| plot_x < band.max_plot_x)
            .unwrap_or(self.bands.len() - 1)
    }

    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.bands.iter().position(|band| band.id == id)
    }
}

/// Visual treatment of an annotation card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardEmphasis {
    /// No band is active.
    Neutral,
    Active,
    Dimmed,
}

impl CardEmphasis {
    #[must_use]
    pub fn opacity(self) -> f64 {
        match self {
            Self::Neutral => 0.9,
            Self::Active => 1.0,
            Self::Dimmed => 0.3,
        }
    }

    #[must_use]
    pub fn scale(self) -> f64 {
        match self {
            Self::Neutral => 1.0,
            Self::Active => 1.05,
            Self::Dimmed => 0.95,
        }
    }
}

/// Pointer state of the speed-revenue widget.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EmphasisState {
    active: Option<usize>,
    cursor_px: Option<f64>,
}

impl EmphasisState {
    #[must_use]
    pub fn active(self) -> Option<usize> {
        self.active
    }

    /// Cursor offset inside the container, in client pixels.
    #[must_use]
    pub fn cursor_px(self) -> Option<f64> {
        self.cursor_px
    }

    /// Classifies the pointer and activates its band.
    pub fn on_pointer_move(
        &mut self,
        bands: &EmphasisBands,
        client_x: f64,
        rect: ContainerRect,
    ) -> ChartResult<usize> {
        let plot_x = pointer_to_plot_x(client_x, rect, bands.view_box_width())?;
        let index = bands.classify_plot_x(plot_x);
        trace!(plot_x, band = index, "speed-revenue pointer move");
        self.active = Some(index);
        self.cursor_px = Some(rect.clamped_offset_x(client_x));
        Ok(index)
    }

    pub fn on_pointer_leave(&mut self) {
        self.active = None;
        self.cursor_px = None;
    }

    #[must_use]
    pub fn is_active(self, band: usize) -> bool {
        self.active == Some(band)
    }

    /// Curve-group opacity: full for the active band or when idle.
    #[must_use]
    pub fn opacity(self, band: usize) -> f64 {
        match self.active {
            Some(active) if active != band => DIMMED_OPACITY,
            _ => ACTIVE_OPACITY,
        }
    }

    /// Opacity of the band's context tile above the chart.
    #[must_use]
    pub fn context_opacity(self, band: usize) -> f64 {
        match self.active {
            Some(active) if active != band => DIMMED_CONTEXT_OPACITY,
            _ => ACTIVE_OPACITY,
        }
    }

    #[must_use]
    pub fn card_emphasis(self, band: usize) -> CardEmphasis {
        match self.active {
            None => CardEmphasis::Neutral,
            Some(active) if active == band => CardEmphasis::Active,
            Some(_) => CardEmphasis::Dimmed,
        }
    }

    #[must_use]
    pub fn stroke_width(self, band: usize) -> f64 {
        if self.is_active(band) {
            ACTIVE_STROKE_WIDTH
        } else {
            IDLE_STROKE_WIDTH
        }
    }

    #[must_use]
    pub fn marker_radius(self, band: usize) -> f64 {
        if self.is_active(band) {
            ACTIVE_MARKER_RADIUS
        } else {
            IDLE_MARKER_RADIUS
        }
    }

    #[must_use]
    pub fn cursor_label(self, bands: &EmphasisBands) -> Option<&str> {
        self.active
            .and_then(|index| bands.bands().get(index))
            .map(|band| band.cursor_label.as_str())
    }
}
