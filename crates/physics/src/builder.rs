//! # Physics Simulation Builder
//!
//! Builder methods for adding and removing bodies, colliders and joints.
//! Removing a body also removes everything attached to it, so no collider or
//! joint can outlive its body.

use glam::Vec2;

use crate::error::PhysicsError;
use crate::types::{
    AttachedCollider, BodyHandle, Collider, ColliderHandle, DistanceJoint, JointHandle, RigidBody,
};
use crate::PhysicsSim;

/// Builder methods for rigid bodies and their colliders
impl PhysicsSim {
    pub fn add_body(&mut self, body: RigidBody) -> BodyHandle {
        self.bodies.insert(body)
    }

    /// Remove a body together with its colliders and joints
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::StaleBody`] if the body was already removed.
    pub fn remove_body(&mut self, handle: BodyHandle) -> Result<RigidBody, PhysicsError> {
        let body = self.bodies.remove(handle).ok_or(PhysicsError::StaleBody(handle))?;

        for collider in self.colliders.handles_where(|c| c.body == handle) {
            self.colliders.remove(collider);
        }
        for joint in self.joints.handles_where(|j| j.body == handle) {
            self.joints.remove(joint);
        }
        Ok(body)
    }

    /// Attach a collider to an existing body
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::StaleBody`] if the body does not exist.
    pub fn add_collider(&mut self, body: BodyHandle, collider: Collider) -> Result<ColliderHandle, PhysicsError> {
        if !self.bodies.contains(body) {
            return Err(PhysicsError::StaleBody(body));
        }
        Ok(self.colliders.insert(AttachedCollider { body, collider }))
    }

    /// # Errors
    ///
    /// Returns [`PhysicsError::StaleCollider`] if the collider was already removed.
    pub fn remove_collider(&mut self, handle: ColliderHandle) -> Result<Collider, PhysicsError> {
        self.colliders
            .remove(handle)
            .map(|attached| attached.collider)
            .ok_or(PhysicsError::StaleCollider(handle))
    }
}

/// Builder methods for constraints
impl PhysicsSim {
    /// Pin `local_anchor` on `body` to `world_anchor` at `distance`
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::StaleBody`] if the body does not exist.
    pub fn add_distance_joint(
        &mut self,
        body: BodyHandle,
        local_anchor: Vec2,
        world_anchor: Vec2,
        distance: f32,
    ) -> Result<JointHandle, PhysicsError> {
        if !self.bodies.contains(body) {
            return Err(PhysicsError::StaleBody(body));
        }
        Ok(self
            .joints
            .insert(DistanceJoint::new(body, local_anchor, world_anchor, distance)))
    }

    /// # Errors
    ///
    /// Returns [`PhysicsError::StaleJoint`] if the joint was already removed.
    pub fn remove_joint(&mut self, handle: JointHandle) -> Result<DistanceJoint, PhysicsError> {
        self.joints.remove(handle).ok_or(PhysicsError::StaleJoint(handle))
    }
}

// Helper functions for inertia calculations

/// Moment of inertia of a ring (or disc when `inner_radius` is 0) whose
/// centre sits `offset` from the body origin
#[must_use]
pub fn moment_for_circle(mass: f32, inner_radius: f32, outer_radius: f32, offset: Vec2) -> f32 {
    mass * (0.5 * (inner_radius * inner_radius + outer_radius * outer_radius) + offset.length_squared())
}

/// Moment of inertia of a thick segment from `a` to `b`
#[must_use]
pub fn moment_for_segment(mass: f32, a: Vec2, b: Vec2, radius: f32) -> f32 {
    let offset = a.lerp(b, 0.5).length_squared();
    let length = a.distance(b) + 2.0 * radius;
    mass * ((length * length + 4.0 * radius * radius) / 12.0 + offset)
}
