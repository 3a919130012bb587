use rig::{ConfigError, RigConfig};

#[test]
fn empty_document_is_the_reference_rig() {
    let config = RigConfig::from_json_str("{}").unwrap();
    assert_eq!(config, RigConfig::default());
}

#[test]
fn partial_overrides_keep_other_defaults() {
    let config = RigConfig::from_json_str(
        r#"{
            "pebbles": { "count": 40, "radius": 5.0 },
            "motion": { "enabled": false },
            "world": { "gravity": [0.0, 500.0] }
        }"#,
    )
    .unwrap();
    assert_eq!(config.pebbles.count, Some(40));
    assert_eq!(config.pebbles.radius, 5.0);
    assert_eq!(config.pebbles.mass, 0.1);
    assert!(!config.motion.enabled);
    assert_eq!(config.motion.sweep_rate, 40.0);
    assert_eq!(config.phys_params().gravity.y, 500.0);
}

#[test]
fn unknown_fields_are_rejected() {
    let err = RigConfig::from_json_str(r#"{ "rod": { "lenght": 10.0 } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn invalid_values_are_rejected() {
    let cases = [
        r#"{ "rod": { "mass": 0.0 } }"#,
        r#"{ "strings": { "min_length": -1.0 } }"#,
        r#"{ "motion": { "sweep_durations": [1.0, 0.0, 1.0, 1.0] } }"#,
        r#"{ "tension": { "min": 10.0, "max": 10.0 } }"#,
        r#"{ "rod": { "attach_margin": 120.0 } }"#,
        r#"{ "capture": { "height_fraction": 1.5 } }"#,
        r#"{ "world": { "solver_iterations": 0 } }"#,
        r#"{ "frame": { "speed": -60.0 } }"#,
        r#"{ "strings": { "manual_rate": -1.0 } }"#,
        r#"{ "motion": { "recovery_factor": -2.0 } }"#,
        r#"{ "tension": { "max_visual": -500.0 } }"#,
    ];
    for json in cases {
        assert!(RigConfig::from_json_str(json).is_err(), "{json}");
    }
}

#[test]
fn non_finite_values_are_rejected() {
    let mut damping = RigConfig::default();
    damping.rod.angular_damping = f32::NAN;
    assert!(matches!(
        damping.validate(),
        Err(ConfigError::Negative { field: "rod.angular_damping", .. })
    ));

    let mut gravity = RigConfig::default();
    gravity.world.gravity = [0.0, f32::INFINITY];
    assert!(matches!(
        gravity.validate(),
        Err(ConfigError::NotFinite { field: "world.gravity[1]", .. })
    ));

    let mut rate = RigConfig::default();
    rate.motion.sweep_rate = f32::NAN;
    assert!(rate.validate().is_err());

    let mut mass = RigConfig::default();
    mass.rod.mass = f32::INFINITY;
    assert!(matches!(mass.validate(), Err(ConfigError::NotPositive { .. })));
}

#[test]
fn missing_file_reports_path() {
    let err = RigConfig::from_path("/nonexistent/rig.json").unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("/nonexistent/rig.json"));
}
