use glam::Vec2;
use physics::ContactPair;
use rig::config::{MotionConfig, PebbleConfig, StringConfig};
use rig::{Control, FrameInput, MotionPhase, RigConfig, Session, Side, PEBBLE, SCOOP};

const DT: f32 = 1.0 / 60.0;

fn quiet_config(pebbles: usize) -> RigConfig {
    RigConfig {
        pebbles: PebbleConfig {
            count: Some(pebbles),
            ..PebbleConfig::default()
        },
        motion: MotionConfig {
            enabled: false,
            ..MotionConfig::default()
        },
        ..RigConfig::default()
    }
}

fn run(session: &mut Session, input: FrameInput, frames: usize) {
    for _ in 0..frames {
        session.step(&input, DT).unwrap();
    }
}

#[test]
fn new_session_matches_reference_rig() {
    let session = Session::new(RigConfig::default()).unwrap();
    let snapshot = session.snapshot().unwrap();

    assert_eq!(snapshot.pebbles.len(), 250);
    assert_eq!(snapshot.captured, 0);
    assert_eq!(snapshot.phase, MotionPhase::Init);
    assert_eq!(snapshot.scoops.len(), 24);
    assert_eq!(snapshot.floor_y, 615.0);
    assert_eq!(snapshot.ceiling_y, 380.0);
    assert_eq!(snapshot.capture_line, 440.0);
    assert!(session.sim().has_contact_filter(SCOOP, PEBBLE));

    // Rest pose: attachments at x = 200 -/+ 56 on y = 500
    let left = snapshot.string(Side::Left);
    assert!((left.attachment - Vec2::new(144.0, 500.0)).length() < 1e-4);
    assert!((snapshot.string(Side::Right).attachment - Vec2::new(256.0, 500.0)).length() < 1e-4);
    let expected = (344.0_f32 * 344.0 + 120.0 * 120.0).sqrt();
    assert!((left.length - expected).abs() < 1e-3);
    assert!((snapshot.string(Side::Right).length - expected).abs() < 1e-3);
}

#[test]
fn string_lengths_never_drop_below_minimum() {
    let config = RigConfig {
        strings: StringConfig {
            manual_rate: 50_000.0,
            ..StringConfig::default()
        },
        pebbles: PebbleConfig {
            count: Some(20),
            ..PebbleConfig::default()
        },
        ..RigConfig::default()
    };
    let mut session = Session::new(config).unwrap();
    let input = FrameInput::default()
        .with(Control::ShortenLeft)
        .with(Control::ShortenRight);

    let first = session.step(&input, DT).unwrap();
    assert_eq!(first.lengths, [10.0, 10.0]);

    for _ in 0..600 {
        let report = session.step(&input, DT).unwrap();
        for length in report.lengths {
            assert!(length >= 10.0, "length {length}");
        }
    }
    for side in Side::BOTH {
        assert!(session.string_length(side).unwrap() >= 10.0);
    }
}

#[test]
fn pebbles_are_conserved_over_a_sweep() {
    let mut session = Session::new(RigConfig::default()).unwrap();
    let mut captured = 0;
    for _ in 0..900 {
        let report = session.step(&FrameInput::default(), DT).unwrap();
        let pebbles = session.pebbles();
        assert_eq!(pebbles.live() + pebbles.captured(), pebbles.spawned());
        assert!(pebbles.captured() >= captured);
        assert_eq!(pebbles.captured(), captured + report.captured);
        captured = pebbles.captured();
    }
    assert_eq!(session.pebbles().spawned(), 250);
}

/// Step with no input; returns contacts dropped on frames that ended with the
/// rod moving down, and contacts dropped in total.
fn sweep(session: &mut Session, frames: usize) -> (usize, usize) {
    let mut while_descending = 0;
    let mut total = 0;
    for _ in 0..frames {
        session.step(&FrameInput::default(), DT).unwrap();
        let filtered = session.sim().stats().filtered_contacts;
        let rod = session.sim().body(session.rig().rod()).unwrap();
        if rod.vel.y > 0.0 {
            while_descending += filtered;
        }
        total += filtered;
    }
    (while_descending, total)
}

#[test]
fn default_rig_captures_pebbles() {
    let mut session = Session::new(RigConfig::default()).unwrap();
    // One minute of simulated time covers INIT and several SWEEP cycles
    let (while_descending, _) = sweep(&mut session, 3600);

    assert!(session.pebbles().captured() > 0);
    assert_eq!(
        session.pebbles().live() + session.pebbles().captured(),
        session.pebbles().spawned()
    );
    assert!(while_descending > 0, "gate never dropped a contact on the way down");
}

#[test]
fn open_gate_changes_how_pebbles_move() {
    let mut gated = Session::new(RigConfig::default()).unwrap();
    let mut open = Session::new(RigConfig::default()).unwrap();
    open.sim_mut().set_contact_filter(SCOOP, PEBBLE, |_: &ContactPair<'_>| true);

    let (_, gated_filtered) = sweep(&mut gated, 900);
    let (_, open_filtered) = sweep(&mut open, 900);

    assert!(gated_filtered > 0);
    assert_eq!(open_filtered, 0);
    assert_ne!(gated.snapshot().unwrap().pebbles, open.snapshot().unwrap().pebbles);
}

#[test]
fn settled_pebbles_stay_on_the_floor() {
    let mut session = Session::new(quiet_config(10)).unwrap();
    run(&mut session, FrameInput::default(), 600);

    let snapshot = session.snapshot().unwrap();
    assert_eq!(snapshot.captured, 0);
    assert_eq!(snapshot.pebbles.len(), 10);
    for pebble in &snapshot.pebbles {
        assert!(pebble.position[1] > snapshot.capture_line);
        assert!(pebble.position[1] < snapshot.floor_y);
    }
}

#[test]
fn reset_matches_a_fresh_session() {
    let config = RigConfig {
        pebbles: PebbleConfig {
            count: Some(40),
            ..PebbleConfig::default()
        },
        ..RigConfig::default()
    };
    let fresh = Session::new(config.clone()).unwrap();
    let mut session = Session::new(config).unwrap();
    run(&mut session, FrameInput::default().with(Control::FrameRight), 200);
    let elapsed = session.elapsed();

    session.reset().unwrap();

    let expected = fresh.snapshot().unwrap();
    let actual = session.snapshot().unwrap();
    assert_eq!(actual.rod, expected.rod);
    assert_eq!(actual.frame, expected.frame);
    assert_eq!(actual.pebbles, expected.pebbles);
    assert_eq!(actual.scoops, expected.scoops);
    assert_eq!(actual.captured, 0);
    assert_eq!(actual.phase, MotionPhase::Init);
    for side in Side::BOTH {
        assert_eq!(actual.string(side).length, expected.string(side).length);
        assert_eq!(actual.string(side).anchor, expected.string(side).anchor);
    }
    assert_eq!(session.motion().elapsed(), 0.0);
    // Session time is not part of the scene
    assert_eq!(session.elapsed(), elapsed);
}

#[test]
fn reset_input_is_applied_at_the_frame_boundary() {
    let mut session = Session::new(quiet_config(10)).unwrap();
    run(&mut session, FrameInput::default().with(Control::FrameLeft), 30);
    assert!(session.frame().center.x < 200.0);

    let report = session
        .step(&FrameInput::default().with(Control::Reset), DT)
        .unwrap();
    assert!(report.reset);
    assert_eq!(session.frame().center.x, 200.0);
    assert_eq!(session.pebbles().spawned(), 10);
    assert_eq!(session.frames(), 31);
}

#[test]
fn reconfigure_validates_now_and_applies_next_frame() {
    let mut session = Session::new(quiet_config(10)).unwrap();

    let mut invalid = quiet_config(5);
    invalid.rod.mass = -1.0;
    assert!(session.reconfigure(invalid).is_err());
    session.step(&FrameInput::default(), DT).unwrap();
    assert_eq!(session.pebbles().spawned(), 10);

    session.reconfigure(quiet_config(5)).unwrap();
    assert_eq!(session.pebbles().spawned(), 10);
    let report = session.step(&FrameInput::default(), DT).unwrap();
    assert!(report.reset);
    assert_eq!(session.pebbles().spawned(), 5);
    assert_eq!(session.config().pebbles.count, Some(5));
}

#[test]
fn frame_moves_horizontally_and_drags_anchors() {
    let mut session = Session::new(quiet_config(0)).unwrap();
    run(&mut session, FrameInput::default().with(Control::FrameRight), 60);

    let snapshot = session.snapshot().unwrap();
    assert!((snapshot.frame.center.x - 260.0).abs() < 1e-2);
    assert_eq!(snapshot.frame.center.y, 500.0);
    assert!((snapshot.string(Side::Left).anchor.x - -140.0).abs() < 1e-2);
    assert!((snapshot.string(Side::Right).anchor.x - 660.0).abs() < 1e-2);
    assert_eq!(snapshot.string(Side::Left).anchor.y, 380.0);
}

#[test]
fn hanging_rod_reports_bounded_tension() {
    let mut session = Session::new(quiet_config(0)).unwrap();
    run(&mut session, FrameInput::default(), 120);

    for reading in session.tensions() {
        assert!(reading.tension.is_finite());
        assert!(reading.tension > 0.0);
        assert!((0.0..=500.0).contains(&reading.magnitude));
        assert!(reading.arrow.is_some());
    }

    // A zero-length step carries no impulse
    let report = session.step(&FrameInput::default(), 0.0).unwrap();
    assert_eq!(report.tensions, [0.0, 0.0]);
    for reading in session.tensions() {
        assert_eq!(reading.magnitude, 0.0);
    }
}

#[test]
fn stats_report_metres_and_degrees() {
    let session = Session::new(quiet_config(3)).unwrap();
    let snapshot = session.snapshot().unwrap();
    let stats = snapshot.stats();

    assert!((stats.rod_position_m.x - 0.25).abs() < 1e-6);
    assert!((stats.rod_position_m.y - 0.625).abs() < 1e-6);
    assert_eq!(stats.rod_angle_deg, 0.0);
    assert_eq!(stats.captured, 0);
    assert_eq!(snapshot.pebble_bytes().len(), 3 * 16);
    assert!(stats.to_string().contains("Pebbles Captured: 0"));
}
