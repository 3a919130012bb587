use rig::config::MotionConfig;
use rig::{LengthDelta, MotionController, MotionPhase};

const DT: f32 = 1.0 / 64.0;

/// (phase, sub-phase, delta) for frames 1..=count
fn trace(count: usize) -> Vec<(MotionPhase, usize, LengthDelta)> {
    let mut motion = MotionController::new(&MotionConfig::default());
    (0..count)
        .map(|_| {
            let delta = motion.advance(DT);
            (motion.phase(), motion.sub_phase(), delta)
        })
        .collect()
}

fn at(trace: &[(MotionPhase, usize, LengthDelta)], frame: usize) -> (MotionPhase, usize, LengthDelta) {
    trace[frame - 1]
}

fn delta(left: f32, right: f32) -> LengthDelta {
    LengthDelta { left, right }
}

#[test]
fn init_shortens_then_tilts() {
    let trace = trace(40);
    for frame in 1..=15 {
        assert_eq!(at(&trace, frame), (MotionPhase::Init, 0, delta(-1.25, -1.25)), "frame {frame}");
    }
    for frame in 16..=31 {
        assert_eq!(at(&trace, frame), (MotionPhase::Init, 1, delta(1.25, -1.25)), "frame {frame}");
    }
}

#[test]
fn init_hands_over_to_sweep_within_the_same_frame() {
    let trace = trace(40);
    // Clock hits 0.5 on frame 32: SWEEP starts and its first row applies
    assert_eq!(at(&trace, 32), (MotionPhase::Sweep, 0, delta(0.625, 0.625)));
    assert_eq!(at(&trace, 33), (MotionPhase::Sweep, 0, delta(0.625, 0.625)));
}

#[test]
fn sweep_boundaries_are_deterministic() {
    let trace = trace(500);
    // SWEEP starts on frame 32 with its clock at 0, so frame 32 + k sits at k/64
    let expected = [
        (131, 0, delta(0.625, 0.625)),
        (132, 1, delta(-0.625, 0.625)),
        (259, 1, delta(-0.625, 0.625)),
        (260, 2, delta(-0.625, -0.625)),
        (359, 2, delta(-0.625, -0.625)),
        (360, 3, delta(1.25, -1.25)),
        (423, 3, delta(1.25, -1.25)),
        (424, 0, delta(0.0, 0.0)),
        (425, 0, delta(0.625, 0.625)),
    ];
    for (frame, sub_phase, d) in expected {
        assert_eq!(at(&trace, frame), (MotionPhase::Sweep, sub_phase, d), "frame {frame}");
    }
}

#[test]
fn sweep_wrap_frame_only_restarts_the_clock() {
    let mut motion = MotionController::new(&MotionConfig::default());
    for _ in 1..424 {
        motion.advance(DT);
    }
    assert_eq!(motion.sub_phase(), 3);

    let wrap = motion.advance(DT);
    assert_eq!(wrap, LengthDelta::default());
    assert_eq!((motion.phase(), motion.sub_phase(), motion.elapsed()), (MotionPhase::Sweep, 0, 0.0));

    let next = motion.advance(DT);
    assert_eq!(next, delta(0.625, 0.625));
    assert!((motion.elapsed() - DT).abs() < 1e-7);
}

#[test]
fn sweep_cycle_is_length_neutral() {
    let mut motion = MotionController::new(&MotionConfig::default());
    // Skip INIT
    for _ in 0..32 {
        motion.advance(DT);
    }
    assert_eq!(motion.phase(), MotionPhase::Sweep);

    let mut total = LengthDelta::default();
    // Frames 33..=423 finish the cycle entered on frame 32
    for _ in 33..424 {
        total = total + motion.advance(DT);
    }
    assert!(total.left.abs() < 1.0, "left drift {}", total.left);
    assert!(total.right.abs() < 1.0, "right drift {}", total.right);
}

#[test]
fn reset_restarts_init() {
    let mut motion = MotionController::new(&MotionConfig::default());
    for _ in 0..100 {
        motion.advance(DT);
    }
    motion.reset();
    assert_eq!(motion.phase(), MotionPhase::Init);
    assert_eq!(motion.elapsed(), 0.0);
    assert_eq!(motion.advance(DT), delta(-1.25, -1.25));
}

#[test]
fn zero_dt_holds_lengths() {
    let mut motion = MotionController::new(&MotionConfig::default());
    assert_eq!(motion.advance(0.0), LengthDelta::default());
    assert_eq!(motion.phase(), MotionPhase::Init);
}
