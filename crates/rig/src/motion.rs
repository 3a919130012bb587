//! Time-driven string length schedule.
//!
//! The controller runs a short INIT phase that lifts the rod off its rest
//! pose, then loops a four-stroke SWEEP cycle forever. Each phase is a table
//! of sub-phases; a sub-phase is active while the phase clock is below its
//! cumulative end time. When the clock runs past the last entry the phase
//! changes and the clock restarts from zero. Entering SWEEP from INIT applies
//! the first SWEEP sub-phase to the same frame; SWEEP wrapping to itself
//! leaves the lengths untouched for that one frame.

use std::ops::Add;

use tracing::debug;

use crate::config::MotionConfig;
use crate::input::FrameInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotionPhase {
    Init,
    Sweep,
}

impl MotionPhase {
    /// Phase entered once this one's table is exhausted
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Init | Self::Sweep => Self::Sweep,
        }
    }
}

/// One row of a phase table: the signed rates applied until the phase clock
/// reaches `until`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseSegment {
    pub until: f32,
    pub left_rate: f32,
    pub right_rate: f32,
}

/// Per-frame change to the two string lengths
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LengthDelta {
    pub left: f32,
    pub right: f32,
}

impl Add for LengthDelta {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            left: self.left + rhs.left,
            right: self.right + rhs.right,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhaseSchedule {
    init: Vec<PhaseSegment>,
    sweep: Vec<PhaseSegment>,
}

impl PhaseSchedule {
    #[must_use]
    pub fn from_config(config: &MotionConfig) -> Self {
        let r0 = config.init_rate;
        let r1 = config.sweep_rate;
        let r2 = config.sweep_rate * config.recovery_factor;

        // Both strings shorten, then the rod tilts
        let init = cumulative(&config.init_durations, &[(-r0, -r0), (r0, -r0)]);
        // Lower, swing, raise, swing back faster
        let sweep = cumulative(
            &config.sweep_durations,
            &[(r1, r1), (-r1, r1), (-r1, -r1), (r2, -r2)],
        );
        Self { init, sweep }
    }

    #[must_use]
    pub fn segments(&self, phase: MotionPhase) -> &[PhaseSegment] {
        match phase {
            MotionPhase::Init => &self.init,
            MotionPhase::Sweep => &self.sweep,
        }
    }

    /// First sub-phase whose end lies beyond `elapsed`
    #[must_use]
    pub fn lookup(&self, phase: MotionPhase, elapsed: f32) -> Option<(usize, &PhaseSegment)> {
        self.segments(phase)
            .iter()
            .enumerate()
            .find(|(_, segment)| elapsed < segment.until)
    }

    /// Length of one full pass through `phase`
    #[must_use]
    pub fn duration(&self, phase: MotionPhase) -> f32 {
        self.segments(phase).last().map_or(0.0, |segment| segment.until)
    }
}

fn cumulative(durations: &[f32], rates: &[(f32, f32)]) -> Vec<PhaseSegment> {
    let mut until = 0.0;
    durations
        .iter()
        .zip(rates)
        .map(|(duration, &(left_rate, right_rate))| {
            until += duration;
            PhaseSegment {
                until,
                left_rate,
                right_rate,
            }
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct MotionController {
    schedule: PhaseSchedule,
    phase: MotionPhase,
    elapsed: f32,
    sub_phase: usize,
    enabled: bool,
}

impl MotionController {
    #[must_use]
    pub fn new(config: &MotionConfig) -> Self {
        Self {
            schedule: PhaseSchedule::from_config(config),
            phase: MotionPhase::Init,
            elapsed: 0.0,
            sub_phase: 0,
            enabled: config.enabled,
        }
    }

    /// Back to the start of INIT
    pub fn reset(&mut self) {
        self.phase = MotionPhase::Init;
        self.elapsed = 0.0;
        self.sub_phase = 0;
    }

    #[must_use]
    pub const fn phase(&self) -> MotionPhase {
        self.phase
    }

    /// Time spent in the current phase
    #[must_use]
    pub const fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Index of the sub-phase applied on the last advance
    #[must_use]
    pub const fn sub_phase(&self) -> usize {
        self.sub_phase
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub const fn schedule(&self) -> &PhaseSchedule {
        &self.schedule
    }

    /// Advance the phase clock by `dt` and return the scripted length change
    /// for this frame.
    pub fn advance(&mut self, dt: f32) -> LengthDelta {
        if !self.enabled {
            return LengthDelta::default();
        }
        self.elapsed += dt;

        if let Some(delta) = self.lookup(dt) {
            return delta;
        }
        let next = self.phase.next();
        debug!(from = ?self.phase, to = ?next, "motion phase transition");
        let wrapped = next == self.phase;
        self.phase = next;
        self.elapsed = 0.0;
        self.sub_phase = 0;
        if wrapped {
            // The wrap frame only restarts the cycle.
            return LengthDelta::default();
        }
        // A validated schedule has positive durations, so elapsed 0 always
        // lands on the first row.
        self.lookup(dt).unwrap_or_default()
    }

    fn lookup(&mut self, dt: f32) -> Option<LengthDelta> {
        let (index, segment) = self.schedule.lookup(self.phase, self.elapsed)?;
        self.sub_phase = index;
        Some(LengthDelta {
            left: segment.left_rate * dt,
            right: segment.right_rate * dt,
        })
    }
}

/// Length change requested by held manual controls.
///
/// Shortening is only honoured while the rod sits below its top limit;
/// lengthening is always honoured.
#[must_use]
pub fn manual_delta(input: &FrameInput, rate: f32, dt: f32, rod_below_top_limit: bool) -> LengthDelta {
    let step = rate * dt;
    let side = |shorten: bool, lengthen: bool| {
        let mut delta = 0.0;
        if shorten && rod_below_top_limit {
            delta -= step;
        }
        if lengthen {
            delta += step;
        }
        delta
    };
    LengthDelta {
        left: side(input.shorten_left, input.lengthen_left),
        right: side(input.shorten_right, input.lengthen_right),
    }
}
