use approx::assert_abs_diff_eq;
use speed_story::api::{StoryEngine, StoryEngineConfig};
use speed_story::core::{ContainerRect, StoryMetric, ZoneTone};
use speed_story::interaction::{InteractionMode, PointerKind};
use speed_story::render::NullRenderer;

fn engine() -> StoryEngine<NullRenderer> {
    StoryEngine::new(NullRenderer::default(), StoryEngineConfig::default()).expect("engine init")
}

fn full_width_rect() -> ContainerRect {
    ContainerRect::new(0.0, 0.0, 1000.0, 500.0)
}

#[test]
fn engine_starts_on_the_three_second_seed_row() {
    let engine = engine();
    let active = engine.active_row();

    assert_eq!(engine.interaction_mode(), InteractionMode::Idle);
    assert_eq!(active.t(), 3.0);
    assert_eq!(active.row.conversion_rate, 1.40);
    assert_eq!(engine.active_zone().id, "risk_zone");

    let narrative = engine.narrative();
    assert_eq!(narrative.title, "Visitors Give Up");
    assert_eq!(
        narrative.numeric,
        "11.0% bounce. ~14.0 sales/1k visits. 40 extra lost users."
    );
    assert_eq!(narrative.cta_label, "Get a Speed-First Build");
    assert_eq!(narrative.tone, ZoneTone::Warning);
    assert_eq!(narrative.load_time_badge, "Load Time: 3.00s");
}

#[test]
fn pointer_move_tracks_row_and_zone() {
    let mut engine = engine();
    let row = engine.pointer_move(0.0, 250.0, full_width_rect());

    assert_eq!(row.t(), 0.5);
    assert_eq!(engine.interaction_mode(), InteractionMode::Tracking);
    assert_eq!(engine.active_row(), row);
    assert_eq!(engine.active_zone().id, "ultra_fast");
    assert_eq!(engine.narrative().title, "Elite Speed");

    let pointer = engine.interaction_state().pointer().expect("pointer sample");
    assert_eq!(pointer.kind, PointerKind::Mouse);
    assert_eq!(pointer.client_y, 250.0);
}

#[test]
fn touch_move_behaves_like_pointer_move() {
    let mut engine = engine();
    let rect = ContainerRect::new(20.0, 0.0, 400.0, 200.0);
    let row = engine.touch_move(420.0, 10.0, rect);

    assert_eq!(row.t(), 10.0);
    assert_eq!(engine.active_zone().id, "almost_unusable");
    let pointer = engine.interaction_state().pointer().expect("pointer sample");
    assert_eq!(pointer.kind, PointerKind::Touch);
}

#[test]
fn pointer_leave_restores_seed_row() {
    let mut engine = engine();
    engine.pointer_move(10.0, 0.0, full_width_rect());
    assert_ne!(engine.active_row().t(), 3.0);

    assert!(engine.pointer_leave());
    assert_eq!(engine.interaction_mode(), InteractionMode::Idle);
    assert_eq!(engine.active_row().t(), 3.0);
    assert_eq!(engine.active_zone().id, "risk_zone");
    assert!(engine.interaction_state().pointer().is_none());

    assert!(!engine.pointer_leave());
}

#[test]
fn invalid_events_keep_previous_state() {
    let mut engine = engine();
    let before = engine.pointer_move(600.0, 0.0, full_width_rect());
    let state = engine.interaction_state();

    let after = engine.pointer_move(300.0, 0.0, ContainerRect::new(0.0, 0.0, 0.0, 100.0));
    assert_eq!(after, before);
    let after = engine.pointer_move(f64::NAN, 0.0, full_width_rect());
    assert_eq!(after, before);
    let after = engine.touch_move(300.0, 0.0, ContainerRect::new(0.0, 0.0, -5.0, 100.0));
    assert_eq!(after, before);

    assert_eq!(engine.interaction_state(), state);
}

#[test]
fn every_event_supersedes_the_previous_one() {
    let mut engine = engine();
    let rect = full_width_rect();
    engine.pointer_move(100.0, 0.0, rect);
    engine.pointer_move(900.0, 0.0, rect);
    let direct = engine
        .interpolate_at_plot_x(900.0 / rect.width * 1000.0)
        .expect("query");

    assert_eq!(engine.active_row(), direct);
}

#[test]
fn queries_do_not_change_interaction_state() {
    let engine = engine();
    let state = engine.interaction_state();
    let row = engine.interpolate_at_time(1.8).expect("query");

    assert_eq!(row.t(), 1.8);
    assert_eq!(engine.zones().classify(row.t()).id, "fast_but_not_elite");
    assert_eq!(engine.interaction_state(), state);
}

#[test]
fn cursor_tracks_active_row_on_both_axes() {
    let engine = engine();
    let cursor = engine.cursor();

    assert_abs_diff_eq!(cursor.plot_x, engine.map_time_to_plot_x(3.0), epsilon = 1e-9);
    assert_abs_diff_eq!(cursor.conversion.y, 480.0 - 1.40 / 3.5 * 460.0, epsilon = 1e-9);
    assert_abs_diff_eq!(cursor.bounce.y, 480.0 - 11.0 / 65.0 * 460.0, epsilon = 1e-9);
}

#[test]
fn only_plotted_metrics_have_curves() {
    let engine = engine();
    assert_eq!(
        engine.curve(StoryMetric::ConversionRate).expect("conversion curve"),
        engine.conversion_curve()
    );
    assert_eq!(
        engine.curve(StoryMetric::BounceRate).expect("bounce curve"),
        engine.bounce_curve()
    );
    assert!(engine.curve(StoryMetric::EstimatedSales).is_err());

    let anchors: Vec<_> = engine.conversion_curve().anchors().collect();
    assert_eq!(anchors.len(), engine.dataset().len());
    assert_eq!(anchors[0].x, 0.0);
}

#[test]
fn render_delivers_a_valid_frame_to_the_renderer() {
    let mut engine = engine();
    engine.render().expect("render");
    engine.pointer_move(512.0, 0.0, full_width_rect());
    engine.render().expect("render");

    let renderer = engine.into_renderer();
    assert_eq!(renderer.frames_rendered, 2);
    assert_eq!(renderer.last_path_count, 2);
    assert_eq!(renderer.last_circle_count, 2);
}
