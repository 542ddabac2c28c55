use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::core::PlotPoint;
use crate::error::{ChartError, ChartResult};

/// Fraction of the neighbour span used as control-arm length.
pub const SMOOTHING_FACTOR: f64 = 0.2;

/// One drawing command of a smoothed path, in plot space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    MoveTo(PlotPoint),
    CubicTo {
        control_start: PlotPoint,
        control_end: PlotPoint,
        end: PlotPoint,
    },
}

impl PathCommand {
    /// Anchor the pen ends on after this command.
    #[must_use]
    pub fn end_point(self) -> PlotPoint {
        match self {
            Self::MoveTo(point) => point,
            Self::CubicTo { end, .. } => end,
        }
    }
}

/// Cubic bezier segment between two anchors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSegment {
    pub start: PlotPoint,
    pub control_start: PlotPoint,
    pub control_end: PlotPoint,
    pub end: PlotPoint,
}

impl CubicSegment {
    /// Evaluates the segment at parameter `u` in `[0, 1]`.
    #[must_use]
    pub fn point_at(&self, u: f64) -> PlotPoint {
        let v = 1.0 - u;
        let a = v * v * v;
        let b = 3.0 * v * v * u;
        let c = 3.0 * v * u * u;
        let d = u * u * u;
        PlotPoint::new(
            a * self.start.x + b * self.control_start.x + c * self.control_end.x + d * self.end.x,
            a * self.start.y + b * self.control_start.y + c * self.control_end.y + d * self.end.y,
        )
    }
}

/// Open smoothed path: one `MoveTo` followed by one `CubicTo` per remaining
/// input point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmoothPath {
    commands: Vec<PathCommand>,
}

impl SmoothPath {
    #[must_use]
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Anchors the path passes through, in input order.
    pub fn anchors(&self) -> impl Iterator<Item = PlotPoint> + '_ {
        self.commands.iter().map(|command| command.end_point())
    }

    pub fn segments(&self) -> impl Iterator<Item = CubicSegment> + '_ {
        self.commands.windows(2).filter_map(|pair| match pair[1] {
            PathCommand::CubicTo {
                control_start,
                control_end,
                end,
            } => Some(CubicSegment {
                start: pair[0].end_point(),
                control_start,
                control_end,
                end,
            }),
            PathCommand::MoveTo(_) => None,
        })
    }

    /// SVG `d` attribute with two-decimal coordinates.
    #[must_use]
    pub fn to_svg_path_data(&self) -> String {
        svg_path_data(&self.commands)
    }
}

/// Serializes commands as an SVG `d` attribute: `M x,y C c1x,c1y c2x,c2y x,y`.
#[must_use]
pub fn svg_path_data(commands: &[PathCommand]) -> String {
    let mut data = String::with_capacity(commands.len() * 48);
    for command in commands {
        if !data.is_empty() {
            data.push(' ');
        }
        // Writing into a String cannot fail.
        let _ = match command {
            PathCommand::MoveTo(point) => write!(data, "M {:.2},{:.2}", point.x, point.y),
            PathCommand::CubicTo {
                control_start,
                control_end,
                end,
            } => write!(
                data,
                "C {:.2},{:.2} {:.2},{:.2} {:.2},{:.2}",
                control_start.x, control_start.y, control_end.x, control_end.y, end.x, end.y
            ),
        };
    }
    data
}

/// Smooths `points` with [`SMOOTHING_FACTOR`].
pub fn smooth_path(points: &[PlotPoint]) -> ChartResult<SmoothPath> {
    smooth_path_with_factor(points, SMOOTHING_FACTOR)
}

/// Builds a Catmull-Rom style bezier path through every point.
///
/// Each anchor gets control arms parallel to the chord between its neighbours,
/// `factor` times the chord length. End points stand in for their own missing
/// neighbour, so the path never extends past the first or last point.
pub fn smooth_path_with_factor(points: &[PlotPoint], factor: f64) -> ChartResult<SmoothPath> {
    if points.len() < 2 {
        return Err(ChartError::InvalidData(
            "smoothing requires at least two points".to_owned(),
        ));
    }
    if !factor.is_finite() || factor < 0.0 {
        return Err(ChartError::InvalidData(
            "smoothing factor must be finite and >= 0".to_owned(),
        ));
    }
    if points.iter().any(|point| !point.is_finite()) {
        return Err(ChartError::InvalidData(
            "smoothing points must be finite".to_owned(),
        ));
    }

    let mut commands = Vec::with_capacity(points.len());
    commands.push(PathCommand::MoveTo(points[0]));
    for index in 1..points.len() {
        let previous = points[index - 1];
        let current = points[index];
        // Outgoing arm of the previous anchor.
        let control_start = control_point(
            previous,
            index.checked_sub(2).map(|i| points[i]),
            Some(current),
            factor,
            false,
        );
        // Incoming arm of the current anchor.
        let control_end = control_point(
            current,
            Some(previous),
            points.get(index + 1).copied(),
            factor,
            true,
        );
        commands.push(PathCommand::CubicTo {
            control_start,
            control_end,
            end: current,
        });
    }

    Ok(SmoothPath { commands })
}

fn control_point(
    current: PlotPoint,
    previous: Option<PlotPoint>,
    next: Option<PlotPoint>,
    factor: f64,
    reverse: bool,
) -> PlotPoint {
    let previous = previous.unwrap_or(current);
    let next = next.unwrap_or(current);
    let dx = next.x - previous.x;
    let dy = next.y - previous.y;
    let length = dx.hypot(dy) * factor;
    let angle = dy.atan2(dx) + if reverse { std::f64::consts::PI } else { 0.0 };
    PlotPoint::new(
        current.x + angle.cos() * length,
        current.y + angle.sin() * length,
    )
}
