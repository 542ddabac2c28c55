use cairo::{Context, Format, ImageSurface, LinearGradient};
use pango::FontDescription;
use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::core::PathCommand;
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, RectFill, RectPrimitive, RenderFrame, Renderer, TextHAlign};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub rects_drawn: usize,
    pub lines_drawn: usize,
    pub paths_drawn: usize,
    pub circles_drawn: usize,
    pub texts_drawn: usize,
}

/// Renderers that can draw a story frame into a caller-owned Cairo context.
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()>;
}

/// Raster backend over Cairo with Pango text.
///
/// Frames in view-box units are scaled to fill the target: the owned image
/// surface for `render`, the clip extents of the caller's context for
/// `render_on_cairo_context`.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    clear_color: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> ChartResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            clear_color: Color::rgb(1.0, 1.0, 1.0),
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango"
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    pub fn set_clear_color(&mut self, color: Color) -> ChartResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    /// Encodes the current surface as PNG.
    pub fn write_png(&self, out: &mut impl std::io::Write) -> ChartResult<()> {
        self.surface
            .write_to_png(out)
            .map_err(|err| ChartError::InvalidData(format!("failed to encode png: {err}")))
    }

    /// Draws `frame` scaled onto the context's clip extents.
    ///
    /// All state changes happen between `save` and `restore`, and the
    /// context is restored on every exit path.
    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        let target = TargetRect::from_clip_extents(context)?;

        context
            .save()
            .map_err(|err| map_backend_error("failed to save state", err))?;
        let drawn = draw_frame(context, frame, target, self.clear_color);
        let restored = context
            .restore()
            .map_err(|err| map_backend_error("failed to restore state", err));

        let stats = drawn?;
        restored?;
        self.last_stats = stats;
        Ok(())
    }
}

/// Region of the cairo target the view box is mapped onto, in user space.
#[derive(Debug, Clone, Copy, PartialEq)]
struct TargetRect {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl TargetRect {
    fn from_clip_extents(context: &Context) -> ChartResult<Self> {
        let (x1, y1, x2, y2) = context
            .clip_extents()
            .map_err(|err| map_backend_error("failed to read clip extents", err))?;
        let target = Self {
            x: x1,
            y: y1,
            width: x2 - x1,
            height: y2 - y1,
        };
        if !(target.width.is_finite() && target.height.is_finite())
            || target.width <= 0.0
            || target.height <= 0.0
        {
            return Err(ChartError::InvalidData(
                "cairo target has an empty drawable area".to_owned(),
            ));
        }
        Ok(target)
    }
}

fn draw_frame(
    context: &Context,
    frame: &RenderFrame,
    target: TargetRect,
    clear_color: Color,
) -> ChartResult<CairoRenderStats> {
    apply_color(context, clear_color);
    context
        .paint()
        .map_err(|err| map_backend_error("failed to clear surface", err))?;

    context.translate(target.x, target.y);
    context.scale(
        target.width / f64::from(frame.viewport.width),
        target.height / f64::from(frame.viewport.height),
    );

    let mut stats = CairoRenderStats::default();

    for rect in &frame.rects {
        append_rect_path(context, rect);
        match &rect.fill {
            RectFill::Solid(color) => apply_color(context, *color),
            RectFill::HorizontalGradient(stops) => {
                let gradient = LinearGradient::new(rect.x, 0.0, rect.x + rect.width, 0.0);
                for stop in stops {
                    let color = stop.color;
                    gradient.add_color_stop_rgba(
                        stop.offset,
                        color.red,
                        color.green,
                        color.blue,
                        color.alpha,
                    );
                }
                context
                    .set_source(&gradient)
                    .map_err(|err| map_backend_error("failed to set gradient source", err))?;
            }
        }
        context
            .fill()
            .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
        stats.rects_drawn += 1;
    }

    for line in &frame.lines {
        apply_color(context, line.color);
        context.set_line_width(line.stroke_width);
        match line.stroke_style.dash_pattern() {
            Some(pattern) => context.set_dash(&pattern, 0.0),
            None => context.set_dash(&[], 0.0),
        }
        context.move_to(line.x1, line.y1);
        context.line_to(line.x2, line.y2);
        context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke line", err))?;
        stats.lines_drawn += 1;
    }
    context.set_dash(&[], 0.0);

    for path in &frame.paths {
        for command in &path.commands {
            match *command {
                PathCommand::MoveTo(point) => context.move_to(point.x, point.y),
                PathCommand::CubicTo {
                    control_start,
                    control_end,
                    end,
                } => context.curve_to(
                    control_start.x,
                    control_start.y,
                    control_end.x,
                    control_end.y,
                    end.x,
                    end.y,
                ),
            }
        }
        apply_color(context, path.color);
        context.set_line_width(path.stroke_width);
        context.set_line_cap(cairo::LineCap::Round);
        context.set_line_join(cairo::LineJoin::Round);
        context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke path", err))?;
        stats.paths_drawn += 1;
    }

    for circle in &frame.circles {
        context.new_sub_path();
        context.arc(circle.center.x, circle.center.y, circle.radius, 0.0, TAU);
        apply_color(context, circle.fill_color);
        if circle.border_width > 0.0 {
            context
                .fill_preserve()
                .map_err(|err| map_backend_error("failed to fill circle", err))?;
            apply_color(context, circle.border_color);
            context.set_line_width(circle.border_width);
            context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke circle border", err))?;
        } else {
            context
                .fill()
                .map_err(|err| map_backend_error("failed to fill circle", err))?;
        }
        stats.circles_drawn += 1;
    }

    for text in &frame.texts {
        let layout = pangocairo::functions::create_layout(context);
        let font_description =
            FontDescription::from_string(&format!("Monospace {}px", text.font_size_px));
        layout.set_font_description(Some(&font_description));
        layout.set_text(&text.text);

        let (text_width, _) = layout.pixel_size();
        let x = match text.h_align {
            TextHAlign::Left => text.x,
            TextHAlign::Center => text.x - f64::from(text_width) / 2.0,
            TextHAlign::Right => text.x - f64::from(text_width),
        };
        // Pango positions layouts from their top edge; `text.y` is the baseline.
        let baseline = f64::from(layout.baseline()) / f64::from(pango::SCALE);

        apply_color(context, text.color);
        context.move_to(x, text.y - baseline);
        pangocairo::functions::show_layout(context, &layout);
        stats.texts_drawn += 1;
    }

    Ok(stats)
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()> {
        self.render_with_context(context, frame)
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn append_rect_path(context: &Context, rect: &RectPrimitive) {
    let radius = rect.effective_corner_radius();
    if radius <= 0.0 {
        context.rectangle(rect.x, rect.y, rect.width, rect.height);
        return;
    }

    let left = rect.x;
    let top = rect.y;
    let right = rect.x + rect.width;
    let bottom = rect.y + rect.height;

    context.new_sub_path();
    context.arc(right - radius, top + radius, radius, -FRAC_PI_2, 0.0);
    context.arc(right - radius, bottom - radius, radius, 0.0, FRAC_PI_2);
    context.arc(left + radius, bottom - radius, radius, FRAC_PI_2, PI);
    context.arc(left + radius, top + radius, radius, PI, PI + FRAC_PI_2);
    context.close_path();
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::InvalidData(format!("{prefix}: {err}"))
}
