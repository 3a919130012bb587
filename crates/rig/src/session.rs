//! A running sweeper: engine, rig, pebbles and the per-frame update order.

use physics::{PhysicsError, PhysicsSim, RigidBody, Vec2};
use tracing::{debug, info};

use crate::config::RigConfig;
use crate::error::{ConfigError, RigError};
use crate::frame::{Boundaries, Frame, RodLimits};
use crate::gate::{ScoopGate, PEBBLE, SCOOP};
use crate::input::FrameInput;
use crate::motion::{manual_delta, MotionController, MotionPhase};
use crate::pebbles::PebbleField;
use crate::rig::{Rig, Side, StringConstraint};
use crate::snapshot::{PebbleInstance, RodPose, Snapshot, StringView};
use crate::tension::{TensionEstimator, TensionReading};

/// Everything in the engine that a reset rebuilds
#[derive(Debug, Clone)]
struct Scene {
    frame: Frame,
    boundaries: Boundaries,
    rig: Rig,
    pebbles: PebbleField,
}

impl Scene {
    fn initialize(sim: &mut PhysicsSim, config: &RigConfig) -> Result<Self, RigError> {
        let frame = Frame::from_config(config);
        let boundaries = Boundaries::build(sim, &frame, config)?;
        let rig = Rig::build(sim, config, &frame)?;
        let pebbles = PebbleField::spawn_field(
            sim,
            &config.pebbles,
            boundaries.floor_y,
            config.world.screen_width,
        )?;
        sim.set_contact_filter(SCOOP, PEBBLE, ScoopGate);

        info!(
            pebbles = pebbles.spawned(),
            scoops = rig.scoops().len(),
            floor_y = boundaries.floor_y,
            ceiling_y = boundaries.ceiling_y,
            "scene initialized"
        );
        Ok(Self {
            frame,
            boundaries,
            rig,
            pebbles,
        })
    }

    fn teardown(&mut self, sim: &mut PhysicsSim) -> Result<(), RigError> {
        self.rig.teardown(sim)?;
        self.pebbles.teardown(sim)?;
        self.boundaries.teardown(sim)?;
        sim.remove_contact_filter(SCOOP, PEBBLE);
        debug_assert_eq!(sim.stats().bodies, 0);
        Ok(())
    }
}

/// Work deferred to the start of the next frame
#[derive(Debug, Clone)]
enum Pending {
    Reset,
    Reconfigure(Box<RigConfig>),
}

/// What one frame did
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Pebbles captured during this frame
    pub captured: usize,
    pub phase: MotionPhase,
    pub lengths: [f32; 2],
    pub tensions: [f32; 2],
    /// True if a reset or reconfigure was applied before this frame ran
    pub reset: bool,
}

pub struct Session {
    config: RigConfig,
    sim: PhysicsSim,
    scene: Scene,
    motion: MotionController,
    tension: TensionEstimator,
    readings: [TensionReading; 2],
    elapsed: f32,
    frames: u64,
    pending: Option<Pending>,
}

impl Session {
    /// Validate `config` and build the initial scene
    ///
    /// # Errors
    ///
    /// Returns [`RigError::Config`] for an invalid configuration.
    pub fn new(config: RigConfig) -> Result<Self, RigError> {
        config.validate()?;
        let mut sim = PhysicsSim::with_params(config.phys_params());
        let scene = Scene::initialize(&mut sim, &config)?;
        Ok(Self {
            motion: MotionController::new(&config.motion),
            tension: TensionEstimator::new(config.tension.clone()),
            readings: [TensionReading::default(); 2],
            config,
            sim,
            scene,
            elapsed: 0.0,
            frames: 0,
            pending: None,
        })
    }

    /// Rebuild the scene immediately. Session time keeps running.
    ///
    /// # Errors
    ///
    /// Propagates engine errors from teardown or rebuild.
    pub fn reset(&mut self) -> Result<(), RigError> {
        self.scene.teardown(&mut self.sim)?;
        self.motion.reset();
        self.readings = [TensionReading::default(); 2];
        self.scene = Scene::initialize(&mut self.sim, &self.config)?;
        info!(elapsed = self.elapsed, "session reset");
        Ok(())
    }

    /// Reset at the start of the next frame
    pub fn request_reset(&mut self) {
        if self.pending.is_none() {
            self.pending = Some(Pending::Reset);
        }
    }

    /// Validate `config` now and switch to it, with a reset, at the start
    /// of the next frame.
    ///
    /// # Errors
    ///
    /// Returns the validation error; the running configuration is kept.
    pub fn reconfigure(&mut self, config: RigConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.pending = Some(Pending::Reconfigure(Box::new(config)));
        Ok(())
    }

    fn apply_pending(&mut self) -> Result<bool, RigError> {
        match self.pending.take() {
            None => Ok(false),
            Some(Pending::Reset) => {
                self.reset()?;
                Ok(true)
            }
            Some(Pending::Reconfigure(config)) => {
                self.scene.teardown(&mut self.sim)?;
                self.config = *config;
                self.sim.params = self.config.phys_params();
                self.motion = MotionController::new(&self.config.motion);
                self.tension = TensionEstimator::new(self.config.tension.clone());
                self.readings = [TensionReading::default(); 2];
                self.scene = Scene::initialize(&mut self.sim, &self.config)?;
                info!(elapsed = self.elapsed, "configuration applied");
                Ok(true)
            }
        }
    }

    /// Advance one frame of `dt` seconds.
    ///
    /// Order: pending reset, string lengths (scripted plus manual), frame
    /// motion and anchors, rod damping and vertical clamps, engine step,
    /// captures, tension.
    ///
    /// # Errors
    ///
    /// Only fails if the scene and the engine disagree about which bodies
    /// exist.
    pub fn step(&mut self, input: &FrameInput, dt: f32) -> Result<FrameReport, RigError> {
        if input.reset {
            self.request_reset();
        }
        let reset = self.apply_pending()?;

        let dt = dt.max(0.0);
        self.elapsed += dt;
        self.frames += 1;

        let rod = self.scene.rig.rod();
        let limits = RodLimits::from_frame(&self.scene.frame, &self.config);
        let rod_y = self.rod_body()?.pos.y;

        // String lengths
        let scripted = self.motion.advance(dt);
        let manual = manual_delta(input, self.config.strings.manual_rate, dt, rod_y > limits.top);
        let delta = scripted + manual;
        let left = self.scene.rig.adjust_length(&mut self.sim, Side::Left, delta.left)?;
        let right = self.scene.rig.adjust_length(&mut self.sim, Side::Right, delta.right)?;

        // Frame motion
        let dx = input.frame_direction() * self.config.frame.speed * dt;
        self.scene.frame.shift(dx);
        self.scene.rig.set_anchors(&mut self.sim, self.scene.frame.anchors())?;

        // Rod bookkeeping against this frame's limits
        let damping = (-self.config.rod.angular_damping * dt).exp();
        let body = self
            .sim
            .body_mut(rod)
            .ok_or(PhysicsError::StaleBody(rod))?;
        body.angular_vel *= damping;
        if body.pos.y < limits.top {
            body.vel.y = body.vel.y.max(0.0);
        }
        if body.pos.y > limits.bottom {
            body.vel.y = body.vel.y.min(0.0);
        }

        self.sim.step(dt);

        let line = self.scene.frame.capture_line(self.config.capture.height_fraction);
        let captured = self.scene.pebbles.capture(&mut self.sim, line)?;

        self.readings = self.read_tensions(dt)?;

        if self.frames % 600 == 0 {
            debug!(
                frame = self.frames,
                phase = ?self.motion.phase(),
                captured = self.scene.pebbles.captured(),
                live = self.scene.pebbles.live(),
                "session progress"
            );
        }

        Ok(FrameReport {
            captured,
            phase: self.motion.phase(),
            lengths: [left, right],
            tensions: [self.readings[0].tension, self.readings[1].tension],
            reset,
        })
    }

    fn read_tensions(&self, dt: f32) -> Result<[TensionReading; 2], RigError> {
        let mut readings = [TensionReading::default(); 2];
        for (reading, string) in readings.iter_mut().zip(self.scene.rig.strings()) {
            let attachment = self.sim.local_to_world(self.scene.rig.rod(), string.attachment())?;
            *reading = self.tension.read(
                string.impulse(&self.sim)?,
                dt,
                attachment,
                string.anchor(&self.sim)?,
            );
        }
        Ok(readings)
    }

    fn rod_body(&self) -> Result<&RigidBody, RigError> {
        let rod = self.scene.rig.rod();
        Ok(self.sim.body(rod).ok_or(PhysicsError::StaleBody(rod))?)
    }

    /// # Errors
    ///
    /// Only fails if the scene and the engine disagree about which bodies
    /// exist.
    pub fn rod_pose(&self) -> Result<RodPose, RigError> {
        let body = self.rod_body()?;
        Ok(RodPose {
            position: body.pos,
            angle: body.angle,
        })
    }

    /// Current target length of one string
    ///
    /// # Errors
    ///
    /// Only fails if the scene and the engine disagree about which joints
    /// exist.
    pub fn string_length(&self, side: Side) -> Result<f32, RigError> {
        Ok(self.scene.rig.string(side).length(&self.sim)?)
    }

    /// # Errors
    ///
    /// Only fails if the scene and the engine disagree about which bodies
    /// exist.
    pub fn snapshot(&self) -> Result<Snapshot, RigError> {
        let rig = &self.scene.rig;
        let rod = rig.rod();

        let view = |string: &StringConstraint, tension: TensionReading| -> Result<StringView, RigError> {
            Ok(StringView {
                side: string.side,
                anchor: string.anchor(&self.sim)?,
                attachment: self.sim.local_to_world(rod, string.attachment())?,
                length: string.length(&self.sim)?,
                tension,
            })
        };
        let [left, right] = rig.strings();
        let strings = [view(left, self.readings[0])?, view(right, self.readings[1])?];

        let mut scoops = Vec::with_capacity(rig.scoops().len());
        for scoop in rig.scoops() {
            scoops.push((
                self.sim.local_to_world(rod, scoop.a)?,
                self.sim.local_to_world(rod, scoop.b)?,
            ));
        }

        let mut pebbles = Vec::with_capacity(self.scene.pebbles.live());
        for pebble in self.scene.pebbles.pebbles() {
            let body = self
                .sim
                .body(pebble.body)
                .ok_or(PhysicsError::StaleBody(pebble.body))?;
            pebbles.push(PebbleInstance {
                position: body.pos.to_array(),
                radius: pebble.radius,
                _padding: 0.0,
            });
        }

        Ok(Snapshot {
            rod: self.rod_pose()?,
            rod_ends: rig.endpoints(&self.sim)?,
            scoops,
            strings,
            pebbles,
            frame: self.scene.frame,
            floor_y: self.scene.boundaries.floor_y,
            ceiling_y: self.scene.boundaries.ceiling_y,
            capture_line: self.scene.frame.capture_line(self.config.capture.height_fraction),
            captured: self.scene.pebbles.captured(),
            phase: self.motion.phase(),
            elapsed: self.elapsed,
            pixels_per_meter: self.config.world.pixels_per_meter,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &RigConfig {
        &self.config
    }

    /// Read-only access to the engine
    #[must_use]
    pub const fn sim(&self) -> &PhysicsSim {
        &self.sim
    }

    /// Mutable access to the engine. A reset or reconfigure rebuilds the
    /// scene and reinstalls the scoop gate.
    pub fn sim_mut(&mut self) -> &mut PhysicsSim {
        &mut self.sim
    }

    #[must_use]
    pub const fn rig(&self) -> &Rig {
        &self.scene.rig
    }

    #[must_use]
    pub const fn frame(&self) -> &Frame {
        &self.scene.frame
    }

    #[must_use]
    pub const fn motion(&self) -> &MotionController {
        &self.motion
    }

    #[must_use]
    pub const fn pebbles(&self) -> &PebbleField {
        &self.scene.pebbles
    }

    #[must_use]
    pub const fn tensions(&self) -> &[TensionReading; 2] {
        &self.readings
    }

    /// Seconds simulated since the session was created
    #[must_use]
    pub const fn elapsed(&self) -> f32 {
        self.elapsed
    }

    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// World-space attachment of one string on the rod
    ///
    /// # Errors
    ///
    /// Only fails if the scene and the engine disagree about which bodies
    /// exist.
    pub fn attachment(&self, side: Side) -> Result<Vec2, RigError> {
        let string = self.scene.rig.string(side);
        Ok(self.sim.local_to_world(self.scene.rig.rod(), string.attachment())?)
    }
}
