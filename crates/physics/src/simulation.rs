//! # Physics Simulation Core
//!
//! This module provides the main simulation container and the step pipeline:
//! collision detection and filtering, velocity integration, constraint
//! solving, and position integration.

use std::collections::HashMap;

use glam::Vec2;

use crate::arena::Arena;
use crate::collision::{capsule_contact, Contact, ContactFilter, ContactPair, SpatialGrid, WorldCapsule};
use crate::error::PhysicsError;
use crate::integrator::{integrate_positions, integrate_velocities};
use crate::steps::contact::ContactConstraint;
use crate::steps::joint::DistanceConstraint;
use crate::steps::SolverBody;
use crate::types::{
    AttachedCollider, BodyHandle, ColliderHandle, CollisionTag, DistanceJoint, JointHandle, PhysParams,
    RigidBody,
};

/// Object counts plus what happened during the last step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimStats {
    pub bodies: usize,
    pub colliders: usize,
    pub joints: usize,
    /// Contacts resolved during the last step
    pub contacts: usize,
    /// Contacts dropped by a contact filter during the last step
    pub filtered_contacts: usize,
}

/// Main physics simulation container
pub struct PhysicsSim {
    pub(crate) bodies: Arena<RigidBody>,
    pub(crate) colliders: Arena<AttachedCollider>,
    pub(crate) joints: Arena<DistanceJoint>,

    // Simulation parameters
    pub params: PhysParams,

    filters: HashMap<(CollisionTag, CollisionTag), Box<dyn ContactFilter>>,
    grid: SpatialGrid,
    last_contacts: usize,
    last_filtered: usize,
}

impl PhysicsSim {
    /// Create a new empty simulation
    #[must_use]
    pub fn new() -> Self {
        Self::with_params(PhysParams::default())
    }

    #[must_use]
    pub fn with_params(params: PhysParams) -> Self {
        Self {
            bodies: Arena::new(),
            colliders: Arena::new(),
            joints: Arena::new(),
            params,
            filters: HashMap::new(),
            grid: SpatialGrid::new(params.grid_cell_size),
            last_contacts: 0,
            last_filtered: 0,
        }
    }

    #[must_use]
    pub fn body(&self, handle: BodyHandle) -> Option<&RigidBody> {
        self.bodies.get(handle)
    }

    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody> {
        self.bodies.get_mut(handle)
    }

    #[must_use]
    pub fn collider(&self, handle: ColliderHandle) -> Option<&AttachedCollider> {
        self.colliders.get(handle)
    }

    #[must_use]
    pub fn joint(&self, handle: JointHandle) -> Option<&DistanceJoint> {
        self.joints.get(handle)
    }

    pub fn joint_mut(&mut self, handle: JointHandle) -> Option<&mut DistanceJoint> {
        self.joints.get_mut(handle)
    }

    pub fn bodies(&self) -> impl Iterator<Item = (BodyHandle, &RigidBody)> {
        self.bodies.iter()
    }

    pub fn colliders(&self) -> impl Iterator<Item = (ColliderHandle, &AttachedCollider)> {
        self.colliders.iter()
    }

    /// Transform a point local to `body` into world coordinates
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::StaleBody`] if the body has been removed.
    pub fn local_to_world(&self, body: BodyHandle, local: Vec2) -> Result<Vec2, PhysicsError> {
        self.bodies
            .get(body)
            .map(|b| b.local_to_world(local))
            .ok_or(PhysicsError::StaleBody(body))
    }

    /// Register `filter` for contacts between colliders tagged `a` and `b`,
    /// replacing any filter already registered for that pair.
    pub fn set_contact_filter(&mut self, a: CollisionTag, b: CollisionTag, filter: impl ContactFilter + 'static) {
        self.filters.remove(&(b, a));
        self.filters.insert((a, b), Box::new(filter));
    }

    /// Returns whether a filter was registered for the pair
    pub fn remove_contact_filter(&mut self, a: CollisionTag, b: CollisionTag) -> bool {
        self.filters.remove(&(a, b)).is_some() || self.filters.remove(&(b, a)).is_some()
    }

    #[must_use]
    pub fn has_contact_filter(&self, a: CollisionTag, b: CollisionTag) -> bool {
        self.filters.contains_key(&(a, b)) || self.filters.contains_key(&(b, a))
    }

    #[must_use]
    pub fn stats(&self) -> SimStats {
        SimStats {
            bodies: self.bodies.len(),
            colliders: self.colliders.len(),
            joints: self.joints.len(),
            contacts: self.last_contacts,
            filtered_contacts: self.last_filtered,
        }
    }

    /// Advance the simulation by `dt`.
    ///
    /// A non-positive `dt` leaves every body untouched and zeroes the joint
    /// impulses.
    pub fn step(&mut self, dt: f32) {
        for (_, joint) in self.joints.iter_mut() {
            joint.impulse = 0.0;
        }
        if dt <= 0.0 {
            self.last_contacts = 0;
            self.last_filtered = 0;
            return;
        }

        // 1. Detect contacts against current poses and velocities
        let accepted = self.detect_contacts();

        // 2. Apply gravity
        integrate_velocities(&mut self.bodies, self.params.gravity, dt);

        // 3. Solve joints and contacts
        self.solve(&accepted, dt);

        // 4. Advance poses
        integrate_positions(&mut self.bodies, dt);

        tracing::trace!(
            bodies = self.bodies.len(),
            contacts = self.last_contacts,
            filtered = self.last_filtered,
            "physics step"
        );
    }
}

// Step pipeline
impl PhysicsSim {
    fn world_capsules(&self) -> Vec<WorldCapsule> {
        self.colliders
            .iter()
            .filter_map(|(_, attached)| {
                let body = self.bodies.get(attached.body)?;
                let (a, b, radius) = attached.collider.shape.capsule();
                Some(WorldCapsule {
                    body: attached.body,
                    a: body.local_to_world(a),
                    b: body.local_to_world(b),
                    radius,
                    material: attached.collider.material,
                    tag: attached.collider.tag,
                    dynamic: body.is_dynamic(),
                })
            })
            .collect()
    }

    /// Narrow phase over broad-phase candidates, with contact filters applied
    fn detect_contacts(&mut self) -> Vec<(BodyHandle, BodyHandle, Contact)> {
        let capsules = self.world_capsules();
        self.grid.set_cell_size(self.params.grid_cell_size);
        self.grid.rebuild(&capsules);

        let mut accepted = Vec::new();
        let mut filtered = 0;
        for (i, j) in self.grid.candidate_pairs(&capsules) {
            let (first, second) = (&capsules[i], &capsules[j]);
            let Some(contact) = capsule_contact(first, second) else {
                continue;
            };
            if self.accepts(first, second, contact) {
                accepted.push((first.body, second.body, contact));
            } else {
                filtered += 1;
            }
        }

        self.last_contacts = accepted.len();
        self.last_filtered = filtered;
        accepted
    }

    fn accepts(&self, first: &WorldCapsule, second: &WorldCapsule, contact: Contact) -> bool {
        let (filter, flipped) = if let Some(filter) = self.filters.get(&(first.tag, second.tag)) {
            (filter, false)
        } else if let Some(filter) = self.filters.get(&(second.tag, first.tag)) {
            (filter, true)
        } else {
            return true;
        };

        let (Some(body_first), Some(body_second)) = (self.bodies.get(first.body), self.bodies.get(second.body))
        else {
            return true;
        };

        let pair = if flipped {
            ContactPair {
                tag_a: second.tag,
                tag_b: first.tag,
                body_a: body_second,
                body_b: body_first,
                contact: contact.flipped(),
            }
        } else {
            ContactPair {
                tag_a: first.tag,
                tag_b: second.tag,
                body_a: body_first,
                body_b: body_second,
                contact,
            }
        };
        filter.should_resolve(&pair)
    }

    fn solve(&mut self, accepted: &[(BodyHandle, BodyHandle, Contact)], dt: f32) {
        let handles: Vec<BodyHandle> = self.bodies.iter().map(|(handle, _)| handle).collect();
        let index_of: HashMap<BodyHandle, usize> = handles
            .iter()
            .enumerate()
            .map(|(index, handle)| (*handle, index))
            .collect();
        let mut solver_bodies: Vec<SolverBody> =
            self.bodies.iter().map(|(_, body)| SolverBody::from_body(body)).collect();

        let mut contacts: Vec<ContactConstraint> = accepted
            .iter()
            .filter_map(|(a, b, contact)| {
                let (a, b) = (*index_of.get(a)?, *index_of.get(b)?);
                Some(ContactConstraint::prepare(&solver_bodies, a, b, contact, &self.params, dt))
            })
            .collect();

        let mut joints: Vec<DistanceConstraint> = self
            .joints
            .iter()
            .filter_map(|(handle, joint)| {
                let index = *index_of.get(&joint.body)?;
                let body = self.bodies.get(joint.body)?;
                DistanceConstraint::prepare(handle, joint, index, body, &solver_bodies[index], &self.params, dt)
            })
            .collect();

        for _ in 0..self.params.iterations {
            for joint in &mut joints {
                joint.solve(&mut solver_bodies);
            }
            for contact in &mut contacts {
                contact.solve(&mut solver_bodies);
            }
        }

        for (handle, solved) in handles.iter().zip(&solver_bodies) {
            if let Some(body) = self.bodies.get_mut(*handle) {
                if body.is_dynamic() {
                    body.vel = solved.vel;
                    body.angular_vel = solved.angular_vel;
                }
            }
        }

        for solved in &joints {
            if let Some(joint) = self.joints.get_mut(solved.joint) {
                joint.impulse = solved.impulse();
            }
        }
    }
}

impl Default for PhysicsSim {
    fn default() -> Self {
        Self::new()
    }
}
