//! The pebble bed on the floor and the capture pass that removes pebbles
//! lifted past the capture line.

use glam::Vec2;
use physics::{moment_for_circle, BodyHandle, Collider, Material, PhysicsError, PhysicsSim, RigidBody};
use tracing::debug;

use crate::config::PebbleConfig;
use crate::gate::PEBBLE;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pebble {
    pub body: BodyHandle,
    pub radius: f32,
}

/// Live pebbles plus capture bookkeeping.
///
/// `live + captured == spawned` holds after every operation.
#[derive(Debug, Clone, Default)]
pub struct PebbleField {
    pebbles: Vec<Pebble>,
    spawned: usize,
    captured: usize,
}

impl PebbleField {
    /// Lay a single row of touching pebbles along the floor, starting at
    /// x = radius.
    ///
    /// # Errors
    ///
    /// Only fails if the engine rejects a freshly added body.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    pub fn spawn_field(
        sim: &mut PhysicsSim,
        config: &PebbleConfig,
        floor_y: f32,
        width: f32,
    ) -> Result<Self, PhysicsError> {
        let radius = config.radius;
        let fits = (width / (2.0 * radius)).floor().max(0.0) as usize;
        let count = config.count.unwrap_or(fits);

        let inertia = moment_for_circle(config.mass, 0.0, radius, Vec2::ZERO);
        let material = Material::new(config.friction, config.restitution);
        let y = floor_y - radius - config.clearance;

        let mut pebbles = Vec::with_capacity(count);
        for i in 0..count {
            let x = i as f32 * 2.0 * radius + radius;
            let body = sim.add_body(RigidBody::dynamic(Vec2::new(x, y), config.mass, inertia));
            sim.add_collider(
                body,
                Collider::circle(Vec2::ZERO, radius)
                    .with_material(material)
                    .with_tag(PEBBLE),
            )?;
            pebbles.push(Pebble { body, radius });
        }
        debug!(count, "pebble field spawned");

        Ok(Self {
            pebbles,
            spawned: count,
            captured: 0,
        })
    }

    /// Remove every pebble whose centre is at or above `boundary_y` and
    /// return how many were taken this call.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::StaleBody`] if a tracked pebble has vanished
    /// from the engine.
    pub fn capture(&mut self, sim: &mut PhysicsSim, boundary_y: f32) -> Result<usize, PhysicsError> {
        let mut taken = 0;
        let mut index = 0;
        while index < self.pebbles.len() {
            let handle = self.pebbles[index].body;
            let y = sim.body(handle).ok_or(PhysicsError::StaleBody(handle))?.pos.y;
            if y <= boundary_y {
                sim.remove_body(handle)?;
                self.pebbles.remove(index);
                taken += 1;
            } else {
                index += 1;
            }
        }

        if taken > 0 {
            self.captured += taken;
            debug!(taken, total = self.captured, "pebbles captured");
        }
        debug_assert_eq!(self.live() + self.captured, self.spawned);
        Ok(taken)
    }

    /// # Errors
    ///
    /// Returns [`PhysicsError::StaleBody`] if a tracked pebble has vanished
    /// from the engine.
    pub fn teardown(&mut self, sim: &mut PhysicsSim) -> Result<(), PhysicsError> {
        for pebble in self.pebbles.drain(..) {
            sim.remove_body(pebble.body)?;
        }
        self.spawned = 0;
        self.captured = 0;
        Ok(())
    }

    #[must_use]
    pub fn pebbles(&self) -> &[Pebble] {
        &self.pebbles
    }

    #[must_use]
    pub fn live(&self) -> usize {
        self.pebbles.len()
    }

    #[must_use]
    pub const fn spawned(&self) -> usize {
        self.spawned
    }

    #[must_use]
    pub const fn captured(&self) -> usize {
        self.captured
    }
}
