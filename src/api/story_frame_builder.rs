use crate::core::{SmoothPath, StoryRow};
use crate::error::ChartResult;
use crate::render::{
    CirclePrimitive, Color, GradientStop, LinePrimitive, LineStrokeStyle, PathPrimitive, RectFill,
    RectPrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive,
};

use super::StoryEngine;

pub const CONVERSION_COLOR: Color = Color::rgb8(0x10, 0xb9, 0x81);
pub const BOUNCE_COLOR: Color = Color::rgb8(0xef, 0x44, 0x44);
pub const AXIS_COLOR: Color = Color::rgb8(0x33, 0x41, 0x55);
pub const GRID_COLOR: Color = Color::rgb8(0x1e, 0x29, 0x3b);
pub const TICK_LABEL_COLOR: Color = Color::rgb8(0x64, 0x74, 0x8b);
pub const CURVE_STROKE_WIDTH: f64 = 3.0;
pub const MARKER_RADIUS: f64 = 6.0;

const RISKY_ZONE_COLOR: Color = Color::rgb8(0xf5, 0x9e, 0x0b);
const ZONE_TINT_ALPHA: f64 = 0.1;
const LEGEND_BACKGROUND: Color = Color::rgb8(0x02, 0x06, 0x17).with_alpha(0.8);
const LEGEND_CONVERSION_TEXT: Color = Color::rgb8(0x34, 0xd3, 0x99);
const LEGEND_BOUNCE_TEXT: Color = Color::rgb8(0xf8, 0x71, 0x71);
const LEGEND_ORIGIN: f64 = 16.0;
const LEGEND_HEIGHT: f64 = 24.0;
const LEGEND_PADDING: f64 = 12.0;
const LEGEND_SWATCH_WIDTH: f64 = 12.0;
const LEGEND_SWATCH_HEIGHT: f64 = 4.0;
const LEGEND_GAP: f64 = 8.0;
const LEGEND_ENTRY_GAP: f64 = 24.0;
const LEGEND_FONT_PX: f64 = 12.0;
// Monospace advance is about 0.6 em.
const LEGEND_CHAR_WIDTH: f64 = LEGEND_FONT_PX * 0.6;
const CURSOR_COLOR: Color = Color::rgba(1.0, 1.0, 1.0, 0.5);
const MARKER_BORDER_COLOR: Color = Color::rgb(1.0, 1.0, 1.0);
const AXIS_STROKE_WIDTH: f64 = 2.0;
const TICK_LABEL_FONT_PX: f64 = 10.0;
const TICK_LABEL_OFFSET: f64 = 15.0;
const GUIDE_DASH: LineStrokeStyle = LineStrokeStyle::Dashed {
    dash: 4.0,
    gap: 4.0,
};
const GRID_DASH: LineStrokeStyle = LineStrokeStyle::Dashed {
    dash: 2.0,
    gap: 2.0,
};

impl<R: Renderer> StoryEngine<R> {
    /// Materializes the chart scene for the current interaction state.
    pub fn build_render_frame(&self) -> ChartResult<RenderFrame> {
        let plot_width = self.plot_width();
        let top = self.config.plot_top_margin;
        let baseline = top + self.config.plot_height;

        let viewport = self.viewport();
        let mut frame = RenderFrame::new(viewport)
            .with_rect(zone_background(f64::from(viewport.width), f64::from(viewport.height)))
            .with_line(LinePrimitive::new(
                0.0,
                baseline,
                plot_width,
                baseline,
                AXIS_STROKE_WIDTH,
                AXIS_COLOR,
            ))
            .with_line(
                LinePrimitive::new(0.0, top, 0.0, baseline, 1.0, AXIS_COLOR)
                    .with_stroke_style(GUIDE_DASH),
            )
            .with_line(
                LinePrimitive::new(plot_width, top, plot_width, baseline, 1.0, AXIS_COLOR)
                    .with_stroke_style(GUIDE_DASH),
            );

        for row in self.tables.dataset.rows() {
            let x = self.map_time_to_plot_x(row.t);
            frame = frame
                .with_line(
                    LinePrimitive::new(x, top, x, baseline, 1.0, GRID_COLOR)
                        .with_stroke_style(GRID_DASH),
                )
                .with_text(tick_label(row, x, baseline + TICK_LABEL_OFFSET));
        }

        frame = frame
            .with_path(curve_primitive(&self.conversion_curve, CONVERSION_COLOR))
            .with_path(curve_primitive(&self.bounce_curve, BOUNCE_COLOR));

        let cursor = self.cursor();
        frame = frame
            .with_line(
                LinePrimitive::new(cursor.plot_x, top, cursor.plot_x, baseline, 1.0, CURSOR_COLOR)
                    .with_stroke_style(GUIDE_DASH),
            )
            .with_circle(
                CirclePrimitive::new(cursor.conversion, MARKER_RADIUS, CONVERSION_COLOR)
                    .with_border(2.0, MARKER_BORDER_COLOR),
            )
            .with_circle(
                CirclePrimitive::new(cursor.bounce, MARKER_RADIUS, BOUNCE_COLOR)
                    .with_border(2.0, MARKER_BORDER_COLOR),
            );

        frame = with_legend(frame);
        frame.validate()?;
        Ok(frame)
    }
}

fn curve_primitive(curve: &SmoothPath, color: Color) -> PathPrimitive {
    PathPrimitive::new(curve.commands().to_vec(), CURVE_STROKE_WIDTH, color)
}

fn tick_label(row: &StoryRow, x: f64, y: f64) -> TextPrimitive {
    TextPrimitive::new(
        format!("{}s", row.t),
        x,
        y,
        TICK_LABEL_FONT_PX,
        TICK_LABEL_COLOR,
        TextHAlign::Center,
    )
}

/// Green to amber to red tint behind the plot, following the zone bands.
fn zone_background(width: f64, height: f64) -> RectPrimitive {
    let fast = CONVERSION_COLOR.with_alpha(ZONE_TINT_ALPHA);
    let slow = BOUNCE_COLOR.with_alpha(ZONE_TINT_ALPHA);
    RectPrimitive::new(
        0.0,
        0.0,
        width,
        height,
        RectFill::HorizontalGradient(vec![
            GradientStop::new(0.0, fast),
            GradientStop::new(0.35, fast),
            GradientStop::new(0.5, RISKY_ZONE_COLOR.with_alpha(ZONE_TINT_ALPHA)),
            GradientStop::new(0.75, slow),
            GradientStop::new(1.0, BOUNCE_COLOR.with_alpha(0.2)),
        ]),
    )
}

/// Pill-shaped legend in the top-left corner: a swatch and label per curve.
fn with_legend(frame: RenderFrame) -> RenderFrame {
    let entries = [
        ("CONVERSION", CONVERSION_COLOR, LEGEND_CONVERSION_TEXT),
        ("BOUNCE", BOUNCE_COLOR, LEGEND_BOUNCE_TEXT),
    ];
    let center_y = LEGEND_ORIGIN + LEGEND_HEIGHT / 2.0;
    let baseline = center_y + LEGEND_FONT_PX / 3.0;

    let mut swatches = Vec::with_capacity(entries.len());
    let mut labels = Vec::with_capacity(entries.len());
    let mut x = LEGEND_ORIGIN + LEGEND_PADDING;
    for (label, swatch_color, text_color) in entries {
        if !labels.is_empty() {
            x += LEGEND_ENTRY_GAP;
        }
        swatches.push(
            RectPrimitive::new(
                x,
                center_y - LEGEND_SWATCH_HEIGHT / 2.0,
                LEGEND_SWATCH_WIDTH,
                LEGEND_SWATCH_HEIGHT,
                RectFill::Solid(swatch_color),
            )
            .with_corner_radius(LEGEND_SWATCH_HEIGHT / 2.0),
        );
        x += LEGEND_SWATCH_WIDTH + LEGEND_GAP;
        labels.push(TextPrimitive::new(
            label,
            x,
            baseline,
            LEGEND_FONT_PX,
            text_color,
            TextHAlign::Left,
        ));
        x += LEGEND_CHAR_WIDTH * label.len() as f64;
    }

    let pill = RectPrimitive::new(
        LEGEND_ORIGIN,
        LEGEND_ORIGIN,
        x + LEGEND_PADDING - LEGEND_ORIGIN,
        LEGEND_HEIGHT,
        RectFill::Solid(LEGEND_BACKGROUND),
    )
    .with_corner_radius(LEGEND_HEIGHT / 2.0);

    let mut frame = frame.with_rect(pill);
    for swatch in swatches {
        frame = frame.with_rect(swatch);
    }
    for label in labels {
        frame = frame.with_text(label);
    }
    frame
}
