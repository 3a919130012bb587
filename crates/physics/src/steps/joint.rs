use glam::Vec2;

use super::SolverBody;
use crate::types::{DistanceJoint, JointHandle, PhysParams, RigidBody};

const MIN_SPAN: f32 = 1e-4;

/// Bilateral distance constraint between a body point and a world anchor
pub(crate) struct DistanceConstraint {
    pub joint: JointHandle,
    body: usize,
    r: Vec2,
    normal: Vec2,
    mass: f32,
    bias: f32,
    impulse: f32,
}

impl DistanceConstraint {
    /// Returns `None` when the attachment sits on the anchor and no
    /// direction can be derived this step.
    pub fn prepare(
        joint_handle: JointHandle,
        joint: &DistanceJoint,
        body_index: usize,
        body: &RigidBody,
        solver_body: &SolverBody,
        params: &PhysParams,
        dt: f32,
    ) -> Option<Self> {
        let r = body.rotate(joint.local_anchor);
        let span = body.pos + r - joint.world_anchor;
        let length = span.length();
        if length < MIN_SPAN {
            return None;
        }
        let normal = span / length;
        let k = solver_body.inv_effective_mass(r, normal);
        if k <= 0.0 {
            return None;
        }
        let error = length - joint.distance;
        let bias = (-params.bias_factor * error / dt).clamp(-params.joint_max_bias, params.joint_max_bias);

        Some(Self {
            joint: joint_handle,
            body: body_index,
            r,
            normal,
            mass: 1.0 / k,
            bias,
            impulse: 0.0,
        })
    }

    pub fn solve(&mut self, bodies: &mut [SolverBody]) {
        let body = &mut bodies[self.body];
        let speed = body.velocity_at(self.r).dot(self.normal);
        let lambda = self.mass * (self.bias - speed);
        self.impulse += lambda;
        body.apply_impulse(self.normal * lambda, self.r);
    }

    /// Total impulse magnitude applied this step
    pub fn impulse(&self) -> f32 {
        self.impulse.abs()
    }
}
