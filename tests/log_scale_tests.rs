use approx::assert_relative_eq;
use speed_story::ChartError;
use speed_story::core::{LogTimeScale, domain_to_plot_x, plot_x_to_domain};

#[test]
fn domain_endpoints_map_to_plot_edges() {
    assert_eq!(domain_to_plot_x(0.5, 0.5, 10.0, 1000.0), 0.0);
    assert_relative_eq!(
        domain_to_plot_x(10.0, 0.5, 10.0, 1000.0),
        1000.0,
        max_relative = 1e-12
    );
}

#[test]
fn one_second_sits_under_a_quarter_of_the_width() {
    let x = domain_to_plot_x(1.0, 0.5, 10.0, 1000.0);
    assert_relative_eq!(x, 231.378_4, epsilon = 1e-3);
}

#[test]
fn five_seconds_maps_past_three_quarters() {
    let scale = LogTimeScale::new(0.5, 10.0).expect("valid scale");
    assert_relative_eq!(scale.time_to_plot_x(5.0, 1000.0), 768.622, epsilon = 1e-3);
}

#[test]
fn inverse_mapping_recovers_load_time() {
    for t in [0.5, 0.75, 1.0, 2.2, 3.0, 6.5, 10.0] {
        let x = domain_to_plot_x(t, 0.5, 10.0, 1000.0);
        assert_relative_eq!(plot_x_to_domain(x, 0.5, 10.0, 1000.0), t, max_relative = 1e-9);
    }
}

#[test]
fn log_scale_rejects_non_positive_or_inverted_domains() {
    for (min, max) in [(0.0, 10.0), (-1.0, 10.0), (5.0, 5.0), (10.0, 0.5)] {
        let err = LogTimeScale::new(min, max).expect_err("domain should be rejected");
        assert!(matches!(err, ChartError::InvalidDomain { .. }));
    }
    assert!(LogTimeScale::new(f64::NAN, 10.0).is_err());
    assert!(LogTimeScale::new(0.5, f64::INFINITY).is_err());
}

#[test]
fn clamp_time_pins_to_domain() {
    let scale = LogTimeScale::new(0.5, 10.0).expect("valid scale");
    assert_eq!(scale.clamp_time(0.1), 0.5);
    assert_eq!(scale.clamp_time(42.0), 10.0);
    assert_eq!(scale.clamp_time(3.0), 3.0);
    assert_eq!(scale.domain(), (0.5, 10.0));
}
