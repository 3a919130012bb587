use std::path::PathBuf;

use rodsweep::app::{run, run_with, RunOptions};
use rodsweep::rig::RigConfig;
use rodsweep::script::InputScript;

fn small_config() -> RigConfig {
    RigConfig::from_json_str(r#"{ "pebbles": { "count": 30 } }"#).unwrap()
}

fn scratch_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("rodsweep-{}-{name}", std::process::id()));
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn runs_for_the_requested_frames() {
    let options = RunOptions {
        frames: 120,
        report_every: 0,
        ..RunOptions::default()
    };
    let summary = run_with(small_config(), &InputScript::default(), &options).unwrap();

    assert_eq!(summary.frames, 120);
    assert!(!summary.quit_early);
    assert_eq!(summary.spawned, 30);
    assert_eq!(summary.live + summary.stats.captured, summary.spawned);
    assert!((summary.stats.elapsed - 2.0).abs() < 1e-3);
}

#[test]
fn scripted_quit_stops_early() {
    let script = InputScript::from_json_str(r#"[{ "quit_at": 0.5 }]"#).unwrap();
    let options = RunOptions {
        frames: 600,
        dt: 0.125,
        report_every: 0,
        ..RunOptions::default()
    };
    let summary = run_with(small_config(), &script, &options).unwrap();

    assert!(summary.quit_early);
    assert_eq!(summary.frames, 4);
}

#[test]
fn loads_config_and_script_from_files() {
    let config = scratch_file("config.json", r#"{ "pebbles": { "count": 12 } }"#);
    let script = scratch_file(
        "script.json",
        r#"[{ "hold": "frame_right", "from": 0.0, "until": 10.0 }]"#,
    );
    let options = RunOptions {
        config: Some(config.clone()),
        script: Some(script.clone()),
        frames: 60,
        report_every: 20,
        ..RunOptions::default()
    };
    let summary = run(&options).unwrap();
    std::fs::remove_file(config).ok();
    std::fs::remove_file(script).ok();

    assert_eq!(summary.spawned, 12);
    assert_eq!(summary.frames, 60);
}

#[test]
fn invalid_config_file_is_an_error() {
    let config = scratch_file("bad.json", r#"{ "rod": { "mass": -2.0 } }"#);
    let options = RunOptions {
        config: Some(config.clone()),
        frames: 1,
        ..RunOptions::default()
    };
    let result = run(&options);
    std::fs::remove_file(config).ok();

    assert!(result.is_err());
}
