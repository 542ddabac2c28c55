use approx::assert_abs_diff_eq;
use speed_story::api::{StoryEngine, StoryEngineConfig};
use speed_story::core::{
    ContainerRect, StoryDataset, StoryInterpolator, StoryRow, StoryTables, classify_pointer,
    interpolate_at_pointer, pointer_to_plot_x,
};
use speed_story::render::NullRenderer;

fn story_dataset() -> StoryDataset {
    StoryTables::performance_story()
        .expect("built-in tables")
        .dataset
}

#[test]
fn plot_x_midpoint_between_three_and_four_seconds_uses_plot_ratio() {
    let dataset = StoryDataset::new(vec![
        StoryRow::new(0.5, 3.2, 5.0, 104.9, -4.9, 32.0, -20.0),
        StoryRow::new(3.0, 1.40, 11.0, 45.9, 54.1, 14.0, 40.0),
        StoryRow::new(4.0, 1.20, 20.0, 39.3, 60.7, 12.0, 130.0),
        StoryRow::new(10.0, 0.6, 60.0, 19.7, 80.3, 6.0, 530.0),
    ])
    .expect("valid dataset");
    let interpolator = StoryInterpolator::new(&dataset, 1000.0).expect("interpolator");
    let scale = interpolator.scale();

    let x3 = scale.time_to_plot_x(3.0, 1000.0);
    let x4 = scale.time_to_plot_x(4.0, 1000.0);
    let mid = interpolator.at_plot_x((x3 + x4) / 2.0);

    assert_eq!(mid.lower_index, 1);
    assert_abs_diff_eq!(mid.ratio, 0.5, epsilon = 1e-9);
    assert_abs_diff_eq!(mid.row.conversion_rate, 1.30, epsilon = 1e-9);
    assert_abs_diff_eq!(mid.row.bounce_rate, 15.5, epsilon = 1e-9);
    // The midpoint on a log axis is the geometric mean, not 3.5s.
    assert_abs_diff_eq!(mid.t(), 12f64.sqrt(), epsilon = 1e-9);

    let naive_ratio = (mid.t() - 3.0) / (4.0 - 3.0);
    let naive_conversion = 1.40 + (1.20 - 1.40) * naive_ratio;
    assert!((mid.row.conversion_rate - naive_conversion).abs() > 1e-3);
}

#[test]
fn pointer_aligned_with_a_row_reproduces_that_row() {
    let dataset = story_dataset();
    let rect = ContainerRect::new(37.0, 210.0, 640.0, 320.0);
    let interpolator = StoryInterpolator::new(&dataset, 1000.0).expect("interpolator");

    for row in dataset.rows() {
        let plot_x = interpolator.scale().time_to_plot_x(row.t, 1000.0);
        let client_x = rect.left + plot_x / 1000.0 * rect.width;
        let interpolated = interpolator
            .at_pointer(client_x, rect)
            .expect("pointer interpolation");

        assert_eq!(interpolated.row, *row, "row at t={}", row.t);
    }
}

#[test]
fn pointer_outside_container_clamps_to_domain_edges() {
    let dataset = story_dataset();
    let rect = ContainerRect::new(100.0, 0.0, 500.0, 250.0);

    let left = interpolate_at_pointer(-5_000.0, rect, &dataset, 1000.0).expect("left");
    assert_eq!(left.row, dataset.rows()[0]);
    assert_eq!(left.lower_index, 0);
    assert_eq!(left.ratio, 0.0);
    assert_eq!(left.plot_x, 0.0);

    let right = interpolate_at_pointer(9_000.0, rect, &dataset, 1000.0).expect("right");
    let last = dataset.rows()[dataset.len() - 1];
    assert_eq!(right.row, last);
    assert_eq!(right.lower_index, dataset.len() - 2);
    assert_eq!(right.ratio, 1.0);
}

#[test]
fn pointer_offset_scales_by_container_width() {
    let rect = ContainerRect::new(100.0, 0.0, 500.0, 250.0);
    let plot_x = pointer_to_plot_x(350.0, rect, 1000.0).expect("plot x");
    assert_abs_diff_eq!(plot_x, 500.0, epsilon = 1e-12);
}

#[test]
fn degenerate_rect_or_pointer_is_rejected() {
    let dataset = story_dataset();
    let zero_width = ContainerRect::new(0.0, 0.0, 0.0, 100.0);
    assert!(interpolate_at_pointer(10.0, zero_width, &dataset, 1000.0).is_err());

    let rect = ContainerRect::new(0.0, 0.0, 800.0, 400.0);
    assert!(interpolate_at_pointer(f64::NAN, rect, &dataset, 1000.0).is_err());
    assert!(interpolate_at_pointer(f64::INFINITY, rect, &dataset, 1000.0).is_err());
}

#[test]
fn at_time_clamps_and_brackets() {
    let dataset = story_dataset();
    let interpolator = StoryInterpolator::new(&dataset, 1000.0).expect("interpolator");

    let below = interpolator.at_time(0.01);
    assert_eq!(below.t(), 0.5);
    assert_eq!(below.row, dataset.rows()[0]);

    let above = interpolator.at_time(60.0);
    assert_eq!(above.t(), 10.0);

    let inside = interpolator.at_time(6.0);
    assert_eq!(inside.lower_index, 6);
    assert!(inside.ratio > 0.0 && inside.ratio < 1.0);
    assert!(inside.row.bounce_rate > 38.0 && inside.row.bounce_rate < 48.0);
}

#[test]
fn at_row_matches_dataset_and_positions_last_row_on_upper_bracket() {
    let dataset = story_dataset();
    let interpolator = StoryInterpolator::new(&dataset, 1000.0).expect("interpolator");

    let seed = interpolator.at_row(4).expect("seed row");
    assert_eq!(seed.row.t, 3.0);
    assert_eq!(seed.lower_index, 4);
    assert_eq!(seed.ratio, 0.0);

    let last = interpolator.at_row(8).expect("last row");
    assert_eq!(last.lower_index, 7);
    assert_eq!(last.ratio, 1.0);
    assert_abs_diff_eq!(last.plot_x, 1000.0, epsilon = 1e-9);

    assert!(interpolator.at_row(9).is_err());
}

#[test]
fn classify_pointer_pairs_row_with_its_zone() {
    let tables = StoryTables::performance_story().expect("built-in tables");
    let rect = ContainerRect::new(10.0, 0.0, 640.0, 320.0);

    let (row, zone) = classify_pointer(10.0, rect, &tables, 1000.0).expect("left edge");
    assert_eq!(row.t(), 0.5);
    assert_eq!(zone.id, "ultra_fast");

    let (row, zone) = classify_pointer(650.0, rect, &tables, 1000.0).expect("right edge");
    assert_eq!(row.t(), 10.0);
    assert_eq!(zone.id, "almost_unusable");

    assert!(classify_pointer(f64::NAN, rect, &tables, 1000.0).is_err());
}

#[test]
fn classify_pointer_agrees_with_engine_state() {
    let tables = StoryTables::performance_story().expect("built-in tables");
    let mut engine = StoryEngine::new(NullRenderer::default(), StoryEngineConfig::default())
        .expect("engine init");
    let rect = ContainerRect::new(0.0, 0.0, 780.0, 390.0);

    for step in 0..=78 {
        let client_x = f64::from(step) * 10.0;
        let (row, zone) = classify_pointer(client_x, rect, &tables, 1000.0).expect("classify");
        let active = engine.pointer_move(client_x, 0.0, rect);
        assert_eq!(active, row);
        assert_eq!(engine.active_zone(), zone);
    }
}
