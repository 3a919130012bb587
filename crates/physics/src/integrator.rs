//! # Physics Integration
//!
//! Semi-implicit Euler: velocities are advanced first, constraints are
//! solved against the new velocities, then positions are advanced with the
//! solved velocities.

use glam::Vec2;

use crate::arena::Arena;
use crate::types::RigidBody;

/// Apply gravity to every dynamic body
pub fn integrate_velocities(bodies: &mut Arena<RigidBody>, gravity: Vec2, dt: f32) {
    for (_, body) in bodies.iter_mut() {
        if body.is_dynamic() {
            body.vel += gravity * dt;
        }
    }
}

/// Advance poses of every dynamic body
pub fn integrate_positions(bodies: &mut Arena<RigidBody>, dt: f32) {
    for (_, body) in bodies.iter_mut() {
        if body.is_dynamic() {
            body.pos += body.vel * dt;
            body.angle += body.angular_vel * dt;
        }
    }
}
