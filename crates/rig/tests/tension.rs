use glam::Vec2;
use rig::config::TensionConfig;
use rig::TensionEstimator;

fn estimator() -> TensionEstimator {
    TensionEstimator::new(TensionConfig::default())
}

#[test]
fn tension_is_impulse_over_dt() {
    assert!((TensionEstimator::estimate(5.0, 0.01) - 500.0).abs() < 1e-3);
    assert_eq!(TensionEstimator::estimate(5.0, 0.0), 0.0);
    assert_eq!(TensionEstimator::estimate(5.0, -0.01), 0.0);
}

#[test]
fn visual_magnitude_stays_in_range() {
    let estimator = estimator();
    for tension in [-1e9, 0.0, 199.0, 200.0, 5100.0, 10_000.0, 1e12, f32::INFINITY, f32::NAN] {
        let magnitude = estimator.visual_magnitude(tension);
        assert!((0.0..=500.0).contains(&magnitude), "{tension} -> {magnitude}");
    }
    assert_eq!(estimator.visual_magnitude(200.0), 0.0);
    assert_eq!(estimator.visual_magnitude(10_000.0), 500.0);
    assert!((estimator.visual_magnitude(5100.0) - 250.0).abs() < 1e-3);
}

#[test]
fn degenerate_string_has_no_arrow() {
    let estimator = estimator();
    let point = Vec2::new(12.0, 34.0);
    let reading = estimator.read(1.0, 1.0 / 60.0, point, point);
    assert!(reading.arrow.is_none());
    assert!(reading.magnitude.is_finite());
}

#[test]
fn arrow_length_tracks_magnitude() {
    let estimator = estimator();
    let reading = estimator.read(100.0, 0.01, Vec2::new(100.0, 500.0), Vec2::new(-200.0, 100.0));
    let arrow = reading.arrow.unwrap();
    assert!(((arrow.end - arrow.start).length() - reading.magnitude).abs() < 1e-3);
    // Points toward the anchor (up and to the left)
    assert!(arrow.end.x < arrow.start.x);
    assert!(arrow.end.y < arrow.start.y);
}
