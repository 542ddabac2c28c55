use std::fmt::Write as _;

use crate::core::svg_path_data;
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, LineStrokeStyle, RectFill, RenderFrame, Renderer, TextHAlign};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SvgRenderStats {
    pub rects_drawn: usize,
    pub lines_drawn: usize,
    pub paths_drawn: usize,
    pub circles_drawn: usize,
    pub texts_drawn: usize,
}

/// Renders frames into a standalone SVG document.
///
/// The document uses the frame viewport as its `viewBox`, so hosts can scale
/// it to any container size, matching how the site embeds its charts.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    background: Option<Color>,
    document: String,
    last_stats: SvgRenderStats,
}

impl SvgRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_background(mut self, color: Color) -> ChartResult<Self> {
        color.validate()?;
        self.background = Some(color);
        Ok(self)
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "svg"
    }

    /// Document produced by the last successful `render` call.
    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }

    #[must_use]
    pub fn into_document(self) -> String {
        self.document
    }

    #[must_use]
    pub fn last_stats(&self) -> SvgRenderStats {
        self.last_stats
    }

    fn write_frame(
        &self,
        frame: &RenderFrame,
    ) -> Result<(String, SvgRenderStats), std::fmt::Error> {
        let mut out = String::with_capacity(4096);
        let mut stats = SvgRenderStats::default();
        let (width, height) = (frame.viewport.width, frame.viewport.height);

        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width} {height}" width="{width}" height="{height}">"#
        )?;

        if let Some(background) = self.background {
            writeln!(
                out,
                r#"  <rect x="0" y="0" width="{width}" height="{height}" fill="{}" fill-opacity="{}"/>"#,
                background.to_hex(),
                fmt_num(background.alpha)
            )?;
        }

        for (index, rect) in frame.rects.iter().enumerate() {
            let fill = match &rect.fill {
                RectFill::Solid(color) => format!(
                    r#"fill="{}" fill-opacity="{}""#,
                    color.to_hex(),
                    fmt_num(color.alpha)
                ),
                RectFill::HorizontalGradient(stops) => {
                    let id = format!("rect-fill-{index}");
                    writeln!(
                        out,
                        r#"  <defs><linearGradient id="{id}" x1="0" y1="0" x2="1" y2="0">"#
                    )?;
                    for stop in stops {
                        writeln!(
                            out,
                            r#"    <stop offset="{}" stop-color="{}" stop-opacity="{}"/>"#,
                            fmt_num(stop.offset),
                            stop.color.to_hex(),
                            fmt_num(stop.color.alpha)
                        )?;
                    }
                    writeln!(out, "  </linearGradient></defs>")?;
                    format!(r##"fill="url(#{id})""##)
                }
            };
            writeln!(
                out,
                r#"  <rect x="{}" y="{}" width="{}" height="{}" rx="{}" {fill}/>"#,
                fmt_num(rect.x),
                fmt_num(rect.y),
                fmt_num(rect.width),
                fmt_num(rect.height),
                fmt_num(rect.effective_corner_radius())
            )?;
            stats.rects_drawn += 1;
        }

        for line in &frame.lines {
            write!(
                out,
                r#"  <line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-opacity="{}" stroke-width="{}""#,
                fmt_num(line.x1),
                fmt_num(line.y1),
                fmt_num(line.x2),
                fmt_num(line.y2),
                line.color.to_hex(),
                fmt_num(line.color.alpha),
                fmt_num(line.stroke_width)
            )?;
            if let LineStrokeStyle::Dashed { dash, gap } = line.stroke_style {
                write!(out, r#" stroke-dasharray="{} {}""#, fmt_num(dash), fmt_num(gap))?;
            }
            writeln!(out, "/>")?;
            stats.lines_drawn += 1;
        }

        for path in &frame.paths {
            writeln!(
                out,
                r#"  <path d="{}" fill="none" stroke="{}" stroke-opacity="{}" stroke-width="{}" stroke-linecap="round" stroke-linejoin="round"/>"#,
                svg_path_data(&path.commands),
                path.color.to_hex(),
                fmt_num(path.color.alpha),
                fmt_num(path.stroke_width)
            )?;
            stats.paths_drawn += 1;
        }

        for circle in &frame.circles {
            writeln!(
                out,
                r#"  <circle cx="{}" cy="{}" r="{}" fill="{}" fill-opacity="{}" stroke="{}" stroke-width="{}"/>"#,
                fmt_num(circle.center.x),
                fmt_num(circle.center.y),
                fmt_num(circle.radius),
                circle.fill_color.to_hex(),
                fmt_num(circle.fill_color.alpha),
                circle.border_color.to_hex(),
                fmt_num(circle.border_width)
            )?;
            stats.circles_drawn += 1;
        }

        for text in &frame.texts {
            let anchor = match text.h_align {
                TextHAlign::Left => "start",
                TextHAlign::Center => "middle",
                TextHAlign::Right => "end",
            };
            writeln!(
                out,
                r#"  <text x="{}" y="{}" font-size="{}" font-family="monospace" fill="{}" fill-opacity="{}" text-anchor="{anchor}">{}</text>"#,
                fmt_num(text.x),
                fmt_num(text.y),
                fmt_num(text.font_size_px),
                text.color.to_hex(),
                fmt_num(text.color.alpha),
                escape_xml(&text.text)
            )?;
            stats.texts_drawn += 1;
        }

        writeln!(out, "</svg>")?;
        Ok((out, stats))
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        let (document, stats) = self
            .write_frame(frame)
            .map_err(|err| ChartError::InvalidData(format!("failed to write svg: {err}")))?;
        self.document = document;
        self.last_stats = stats;
        Ok(())
    }
}

/// Two decimals with trailing zeros trimmed: `480`, `230.5`, `0.25`.
fn fmt_num(value: f64) -> String {
    let formatted = format!("{value:.2}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_owned()
    } else {
        trimmed.to_owned()
    }
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::{escape_xml, fmt_num};

    #[test]
    fn fmt_num_trims_trailing_zeros() {
        assert_eq!(fmt_num(480.0), "480");
        assert_eq!(fmt_num(230.5), "230.5");
        assert_eq!(fmt_num(0.25), "0.25");
        assert_eq!(fmt_num(-0.001), "0");
    }

    #[test]
    fn escape_xml_covers_markup_characters() {
        assert_eq!(escape_xml("a < b & c"), "a &lt; b &amp; c");
    }
}
