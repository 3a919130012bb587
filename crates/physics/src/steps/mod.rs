//! Sequential-impulse solver passes.
//!
//! Bodies are copied into a dense [`SolverBody`] array before solving and
//! the resulting velocities are written back afterwards, so constraints can
//! address two bodies by index without juggling mutable borrows.

pub(crate) mod contact;
pub(crate) mod joint;

use glam::Vec2;

use crate::types::RigidBody;

#[derive(Debug, Clone, Copy)]
pub(crate) struct SolverBody {
    pub pos: Vec2,
    pub vel: Vec2,
    pub angular_vel: f32,
    pub inv_mass: f32,
    pub inv_inertia: f32,
}

impl SolverBody {
    pub fn from_body(body: &RigidBody) -> Self {
        Self {
            pos: body.pos,
            vel: body.vel,
            angular_vel: body.angular_vel,
            inv_mass: body.inv_mass(),
            inv_inertia: body.inv_inertia(),
        }
    }

    /// Velocity of the point at offset `r` from the body origin
    pub fn velocity_at(&self, r: Vec2) -> Vec2 {
        self.vel + r.perp() * self.angular_vel
    }

    /// Apply `impulse` at offset `r` from the body origin
    pub fn apply_impulse(&mut self, impulse: Vec2, r: Vec2) {
        self.vel += impulse * self.inv_mass;
        self.angular_vel += self.inv_inertia * r.perp_dot(impulse);
    }

    /// Inverse effective mass along `direction` at offset `r`
    pub fn inv_effective_mass(&self, r: Vec2, direction: Vec2) -> f32 {
        let rn = r.perp_dot(direction);
        self.inv_mass + self.inv_inertia * rn * rn
    }
}
