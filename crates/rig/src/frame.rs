//! Overhead frame geometry and the static floor/ceiling it implies.

use glam::Vec2;
use physics::{BodyHandle, Collider, Material, PhysicsError, PhysicsSim, RigidBody};

use crate::config::RigConfig;

/// Axis-aligned rectangle the strings hang from. Only moves along x.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub center: Vec2,
    pub width: f32,
    pub height: f32,
}

/// World-space string anchors at the frame's top corners
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchors {
    pub left: Vec2,
    pub right: Vec2,
}

impl Frame {
    #[must_use]
    pub fn from_config(config: &RigConfig) -> Self {
        Self {
            center: Vec2::from(config.frame.center),
            width: config.frame.width,
            height: config.frame.height,
        }
    }

    #[must_use]
    pub fn left(&self) -> f32 {
        self.center.x - self.width / 2.0
    }

    #[must_use]
    pub fn right(&self) -> f32 {
        self.center.x + self.width / 2.0
    }

    #[must_use]
    pub fn top(&self) -> f32 {
        self.center.y - self.height / 2.0
    }

    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.center.y + self.height / 2.0
    }

    #[must_use]
    pub fn anchors(&self) -> Anchors {
        Anchors {
            left: Vec2::new(self.left(), self.top()),
            right: Vec2::new(self.right(), self.top()),
        }
    }

    pub fn shift(&mut self, dx: f32) {
        self.center.x += dx;
    }

    /// Pebbles at or above this y are captured
    #[must_use]
    pub fn capture_line(&self, height_fraction: f32) -> f32 {
        self.center.y - self.height * height_fraction
    }

    #[must_use]
    pub fn ceiling_y(&self) -> f32 {
        self.top()
    }

    #[must_use]
    pub fn floor_y(&self, inset: f32) -> f32 {
        self.bottom() - inset
    }
}

/// Soft vertical bounds on the rod's centre
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RodLimits {
    pub top: f32,
    pub bottom: f32,
}

impl RodLimits {
    /// Derived from the frame as it stands this frame
    #[must_use]
    pub fn from_frame(frame: &Frame, config: &RigConfig) -> Self {
        Self {
            top: frame.ceiling_y() + config.rod.top_limit_offset,
            bottom: frame.floor_y(config.world.floor_inset) - config.rod.bottom_limit_offset,
        }
    }
}

/// Static floor and ceiling segments spanning the screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boundaries {
    pub floor: BodyHandle,
    pub ceiling: BodyHandle,
    pub floor_y: f32,
    pub ceiling_y: f32,
}

impl Boundaries {
    /// # Errors
    ///
    /// Only fails if a freshly added body is rejected by the engine.
    pub fn build(sim: &mut PhysicsSim, frame: &Frame, config: &RigConfig) -> Result<Self, PhysicsError> {
        let width = config.world.screen_width;
        let radius = config.world.boundary_radius;
        let floor_y = frame.floor_y(config.world.floor_inset);
        let ceiling_y = frame.ceiling_y();

        let floor = sim.add_body(RigidBody::fixed(Vec2::ZERO));
        sim.add_collider(
            floor,
            Collider::segment(Vec2::new(0.0, floor_y), Vec2::new(width, floor_y), radius)
                .with_material(Material::new(config.world.floor_friction, 0.0)),
        )?;
        let ceiling = sim.add_body(RigidBody::fixed(Vec2::ZERO));
        sim.add_collider(
            ceiling,
            Collider::segment(Vec2::new(0.0, ceiling_y), Vec2::new(width, ceiling_y), radius),
        )?;

        Ok(Self {
            floor,
            ceiling,
            floor_y,
            ceiling_y,
        })
    }

    /// # Errors
    ///
    /// Returns [`PhysicsError::StaleBody`] if either boundary is already gone.
    pub fn teardown(&self, sim: &mut PhysicsSim) -> Result<(), PhysicsError> {
        sim.remove_body(self.floor)?;
        sim.remove_body(self.ceiling)?;
        Ok(())
    }
}
