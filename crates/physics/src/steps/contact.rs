use glam::Vec2;

use super::SolverBody;
use crate::collision::Contact;
use crate::types::PhysParams;

/// One non-penetration contact with Coulomb friction
pub(crate) struct ContactConstraint {
    body_a: usize,
    body_b: usize,
    ra: Vec2,
    rb: Vec2,
    normal: Vec2,
    normal_mass: f32,
    tangent_mass: f32,
    friction: f32,
    /// Target separating velocity: positional bias or bounce, whichever is larger
    target: f32,
    normal_impulse: f32,
    tangent_impulse: f32,
}

impl ContactConstraint {
    pub fn prepare(
        bodies: &[SolverBody],
        body_a: usize,
        body_b: usize,
        contact: &Contact,
        params: &PhysParams,
        dt: f32,
    ) -> Self {
        let a = &bodies[body_a];
        let b = &bodies[body_b];
        let ra = contact.point - a.pos;
        let rb = contact.point - b.pos;
        let normal = contact.normal;
        let tangent = normal.perp();

        let kn = a.inv_effective_mass(ra, normal) + b.inv_effective_mass(rb, normal);
        let kt = a.inv_effective_mass(ra, tangent) + b.inv_effective_mass(rb, tangent);

        let approach = (b.velocity_at(rb) - a.velocity_at(ra)).dot(normal);
        let bounce = if approach < -params.bounce_threshold {
            -contact.restitution * approach
        } else {
            0.0
        };
        let bias = params.bias_factor / dt * (contact.depth - params.collision_slop).max(0.0);

        Self {
            body_a,
            body_b,
            ra,
            rb,
            normal,
            normal_mass: if kn > 0.0 { 1.0 / kn } else { 0.0 },
            tangent_mass: if kt > 0.0 { 1.0 / kt } else { 0.0 },
            friction: contact.friction,
            target: bias.max(bounce),
            normal_impulse: 0.0,
            tangent_impulse: 0.0,
        }
    }

    pub fn solve(&mut self, bodies: &mut [SolverBody]) {
        let tangent = self.normal.perp();

        // Friction first, bounded by the normal impulse accumulated so far
        let relative = self.relative_velocity(bodies);
        let lambda = -self.tangent_mass * relative.dot(tangent);
        let max_friction = self.friction * self.normal_impulse;
        let accumulated = (self.tangent_impulse + lambda).clamp(-max_friction, max_friction);
        let lambda = accumulated - self.tangent_impulse;
        self.tangent_impulse = accumulated;
        self.apply(bodies, tangent * lambda);

        let relative = self.relative_velocity(bodies);
        let lambda = self.normal_mass * (self.target - relative.dot(self.normal));
        let accumulated = (self.normal_impulse + lambda).max(0.0);
        let lambda = accumulated - self.normal_impulse;
        self.normal_impulse = accumulated;
        self.apply(bodies, self.normal * lambda);
    }

    fn relative_velocity(&self, bodies: &[SolverBody]) -> Vec2 {
        bodies[self.body_b].velocity_at(self.rb) - bodies[self.body_a].velocity_at(self.ra)
    }

    fn apply(&self, bodies: &mut [SolverBody], impulse: Vec2) {
        bodies[self.body_a].apply_impulse(-impulse, self.ra);
        bodies[self.body_b].apply_impulse(impulse, self.rb);
    }
}
