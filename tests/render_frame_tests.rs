use approx::assert_abs_diff_eq;
use speed_story::api::{BOUNCE_COLOR, CONVERSION_COLOR, StoryEngine, StoryEngineConfig};
use speed_story::core::{ContainerRect, PathCommand, PlotPoint, Viewport};
use speed_story::render::{
    CirclePrimitive, Color, GradientStop, LinePrimitive, LineStrokeStyle, NullRenderer,
    PathPrimitive, RectFill, RectPrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive,
};

fn engine() -> StoryEngine<NullRenderer> {
    StoryEngine::new(NullRenderer::default(), StoryEngineConfig::default()).expect("engine init")
}

#[test]
fn story_frame_contains_axes_grid_curves_and_markers() {
    let engine = engine();
    let frame = engine.build_render_frame().expect("frame");
    let rows = engine.dataset().len();

    // Zone tint, legend pill and one swatch per curve.
    assert_eq!(frame.rects.len(), 4);
    // Axis, two guides, one grid line per row and the cursor.
    assert_eq!(frame.lines.len(), 3 + rows + 1);
    assert_eq!(frame.paths.len(), 2);
    assert_eq!(frame.circles.len(), 2);
    assert_eq!(frame.texts.len(), rows + 2);
    assert_eq!(frame.primitive_count(), 4 + 3 + rows + 1 + 2 + 2 + rows + 2);

    let axis = frame.lines[0];
    assert_eq!((axis.y1, axis.y2), (480.0, 480.0));
    assert_eq!((axis.x1, axis.x2), (0.0, 1000.0));
    assert_eq!(axis.stroke_style, LineStrokeStyle::Solid);
    assert_eq!(
        frame.lines[1].stroke_style,
        LineStrokeStyle::Dashed { dash: 4.0, gap: 4.0 }
    );
    assert_eq!(
        frame.lines[3].stroke_style,
        LineStrokeStyle::Dashed { dash: 2.0, gap: 2.0 }
    );
}

#[test]
fn tick_labels_name_each_sample_in_seconds() {
    let frame = engine().build_render_frame().expect("frame");
    let ticks = &frame.texts[..9];
    let labels: Vec<&str> = ticks.iter().map(|text| text.text.as_str()).collect();
    assert_eq!(
        labels,
        ["0.5s", "1s", "1.5s", "2s", "3s", "4s", "5s", "7s", "10s"]
    );
    assert!(ticks.iter().all(|text| text.h_align == TextHAlign::Center));
    assert!(ticks.iter().all(|text| text.y == 495.0));
}

#[test]
fn zone_tint_spans_the_view_box_from_green_to_red() {
    let frame = engine().build_render_frame().expect("frame");
    let background = &frame.rects[0];
    assert_eq!(
        (background.x, background.y, background.width, background.height),
        (0.0, 0.0, 1000.0, 500.0)
    );

    let RectFill::HorizontalGradient(stops) = &background.fill else {
        panic!("zone tint should be a gradient");
    };
    let offsets: Vec<f64> = stops.iter().map(|stop| stop.offset).collect();
    assert_eq!(offsets, [0.0, 0.35, 0.5, 0.75, 1.0]);
    assert_eq!(stops[0].color, CONVERSION_COLOR.with_alpha(0.1));
    assert_eq!(stops[2].color, Color::rgb8(0xf5, 0x9e, 0x0b).with_alpha(0.1));
    assert_eq!(stops[4].color, BOUNCE_COLOR.with_alpha(0.2));
}

#[test]
fn legend_labels_each_curve_inside_its_pill() {
    let frame = engine().build_render_frame().expect("frame");
    let pill = &frame.rects[1];
    assert_eq!((pill.x, pill.y, pill.height), (16.0, 16.0, 24.0));
    assert_eq!(pill.effective_corner_radius(), 12.0);

    let swatch_colors: Vec<RectFill> = frame.rects[2..].iter().map(|r| r.fill.clone()).collect();
    assert_eq!(
        swatch_colors,
        [RectFill::Solid(CONVERSION_COLOR), RectFill::Solid(BOUNCE_COLOR)]
    );

    let legend = &frame.texts[9..];
    let labels: Vec<&str> = legend.iter().map(|text| text.text.as_str()).collect();
    assert_eq!(labels, ["CONVERSION", "BOUNCE"]);
    for (swatch, label) in frame.rects[2..].iter().zip(legend) {
        assert!(swatch.x > pill.x && label.x > swatch.x + swatch.width);
        assert!(label.x < pill.x + pill.width);
        assert!(label.y > pill.y && label.y < pill.y + pill.height);
    }
}

#[test]
fn curves_are_colored_per_metric() {
    let engine = engine();
    let frame = engine.build_render_frame().expect("frame");
    assert_eq!(frame.paths[0].color, CONVERSION_COLOR);
    assert_eq!(frame.paths[1].color, BOUNCE_COLOR);
    assert_eq!(frame.paths[0].commands, engine.conversion_curve().commands());
    assert_eq!(CONVERSION_COLOR.to_hex(), "#10b981");
    assert_eq!(BOUNCE_COLOR.to_hex(), "#ef4444");
}

#[test]
fn markers_follow_the_active_row() {
    let mut engine = engine();
    engine.pointer_move(1000.0, 0.0, ContainerRect::new(0.0, 0.0, 1000.0, 500.0));
    let frame = engine.build_render_frame().expect("frame");

    let cursor_line = frame.lines.last().copied().expect("cursor line");
    assert_abs_diff_eq!(cursor_line.x1, 1000.0, epsilon = 1e-9);

    let conversion = frame.circles[0];
    assert_eq!(conversion.radius, 6.0);
    assert_abs_diff_eq!(conversion.center.y, 480.0 - 0.60 / 3.5 * 460.0, epsilon = 1e-9);
    let bounce = frame.circles[1];
    assert_abs_diff_eq!(bounce.center.y, 480.0 - 60.0 / 65.0 * 460.0, epsilon = 1e-9);
}

#[test]
fn frame_validation_rejects_bad_primitives() {
    let viewport = Viewport::new(1000, 500);
    let white = Color::rgb(1.0, 1.0, 1.0);

    let bad_line = RenderFrame::new(viewport).with_line(LinePrimitive::new(
        0.0,
        f64::NAN,
        1.0,
        1.0,
        1.0,
        white,
    ));
    assert!(bad_line.validate().is_err());

    let bad_dash = RenderFrame::new(viewport).with_line(
        LinePrimitive::new(0.0, 0.0, 1.0, 1.0, 1.0, white)
            .with_stroke_style(LineStrokeStyle::Dashed { dash: 0.0, gap: 2.0 }),
    );
    assert!(bad_dash.validate().is_err());

    let headless_path = RenderFrame::new(viewport).with_path(PathPrimitive::new(
        vec![PathCommand::CubicTo {
            control_start: PlotPoint::new(0.0, 0.0),
            control_end: PlotPoint::new(1.0, 1.0),
            end: PlotPoint::new(2.0, 2.0),
        }],
        2.0,
        white,
    ));
    assert!(headless_path.validate().is_err());

    let bad_circle = RenderFrame::new(viewport)
        .with_circle(CirclePrimitive::new(PlotPoint::new(1.0, 1.0), 0.0, white));
    assert!(bad_circle.validate().is_err());

    let empty_text = RenderFrame::new(viewport).with_text(TextPrimitive::new(
        "",
        0.0,
        0.0,
        10.0,
        white,
        TextHAlign::Left,
    ));
    assert!(empty_text.validate().is_err());

    let bad_color = RenderFrame::new(viewport).with_line(LinePrimitive::new(
        0.0,
        0.0,
        1.0,
        1.0,
        1.0,
        Color::rgba(1.2, 0.0, 0.0, 1.0),
    ));
    assert!(bad_color.validate().is_err());

    assert!(RenderFrame::new(Viewport::new(0, 10)).validate().is_err());

    let flat_rect = RenderFrame::new(viewport).with_rect(RectPrimitive::new(
        0.0,
        0.0,
        10.0,
        0.0,
        RectFill::Solid(white),
    ));
    assert!(flat_rect.validate().is_err());

    let single_stop = RenderFrame::new(viewport).with_rect(RectPrimitive::new(
        0.0,
        0.0,
        10.0,
        10.0,
        RectFill::HorizontalGradient(vec![GradientStop::new(0.0, white)]),
    ));
    assert!(single_stop.validate().is_err());

    let unordered_stops = RenderFrame::new(viewport).with_rect(RectPrimitive::new(
        0.0,
        0.0,
        10.0,
        10.0,
        RectFill::HorizontalGradient(vec![
            GradientStop::new(0.6, white),
            GradientStop::new(0.4, white),
        ]),
    ));
    assert!(unordered_stops.validate().is_err());
}

#[test]
fn null_renderer_counts_rendered_primitives() {
    let mut renderer = NullRenderer::default();
    let frame = engine().build_render_frame().expect("frame");
    renderer.render(&frame).expect("render");

    assert_eq!(renderer.frames_rendered, 1);
    assert_eq!(renderer.last_rect_count, frame.rects.len());
    assert_eq!(renderer.last_line_count, frame.lines.len());
    assert_eq!(renderer.last_text_count, frame.texts.len());
    assert!(!frame.is_empty());
    assert!(RenderFrame::new(Viewport::new(10, 10)).is_empty());
}
