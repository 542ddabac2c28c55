use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Plot-space view box. The original widgets draw into `0 0 1000 500`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }

    #[must_use]
    pub fn plot_width(self) -> f64 {
        f64::from(self.width)
    }

    #[must_use]
    pub fn plot_height(self) -> f64 {
        f64::from(self.height)
    }
}

/// Bounding box of the chart container in viewport (client) pixels.
///
/// Hosts pass a fresh rect with every event; the container may resize
/// between events.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContainerRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ContainerRect {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.left.is_finite() || !self.top.is_finite() {
            return Err(ChartError::InvalidData(
                "container origin must be finite".to_owned(),
            ));
        }
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(ChartError::InvalidData(
                "container width must be finite and > 0".to_owned(),
            ));
        }
        if !self.height.is_finite() || self.height < 0.0 {
            return Err(ChartError::InvalidData(
                "container height must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }

    /// Horizontal pointer offset relative to the container, clamped to
    /// `[0, width]`.
    ///
    /// Fast pointer movement can deliver events slightly outside the element.
    #[must_use]
    pub fn clamped_offset_x(self, client_x: f64) -> f64 {
        (client_x - self.left).clamp(0.0, self.width)
    }
}

/// Coordinate-mapped point in plot space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotPoint {
    pub x: f64,
    pub y: f64,
}

impl PlotPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}
