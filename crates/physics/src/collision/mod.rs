//! # Collision Detection
//!
//! Every collider is treated as a capsule (a segment swept by a disc; a circle
//! is a zero-length segment), so a single narrow-phase routine covers all
//! shape pairs. Candidate pairs come from a uniform grid broad phase.

mod broad_phase;
mod capsule;

pub(crate) use broad_phase::SpatialGrid;
pub(crate) use capsule::{capsule_contact, WorldCapsule};

use glam::Vec2;

use crate::types::{CollisionTag, Material, RigidBody};

/// Contact information for collision response
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Contact point in world space
    pub point: Vec2,
    /// Contact normal (from collider A to collider B)
    pub normal: Vec2,
    /// Penetration depth
    pub depth: f32,
    /// Combined friction coefficient
    pub friction: f32,
    /// Combined restitution coefficient
    pub restitution: f32,
}

impl Contact {
    /// Create a new contact with material properties
    #[must_use]
    pub fn new(point: Vec2, normal: Vec2, depth: f32, mat_a: &Material, mat_b: &Material) -> Self {
        Self {
            point,
            normal,
            depth,
            friction: combine_friction(mat_a.friction, mat_b.friction),
            restitution: combine_restitution(mat_a.restitution, mat_b.restitution),
        }
    }

    /// Same contact seen from the other collider
    #[must_use]
    pub fn flipped(self) -> Self {
        Self {
            normal: -self.normal,
            ..self
        }
    }
}

/// Combine friction coefficients multiplicatively
fn combine_friction(f1: f32, f2: f32) -> f32 {
    f1 * f2
}

/// Combine restitution coefficients multiplicatively
fn combine_restitution(r1: f32, r2: f32) -> f32 {
    r1 * r2
}

/// A contact about to be resolved, oriented so that `tag_a`/`body_a` match
/// the first tag of the filter's registration key.
pub struct ContactPair<'a> {
    pub tag_a: CollisionTag,
    pub tag_b: CollisionTag,
    pub body_a: &'a RigidBody,
    pub body_b: &'a RigidBody,
    pub contact: Contact,
}

/// Pre-resolution predicate registered for a pair of collision tags.
///
/// Returning `false` drops the contact for this step: no impulse is applied
/// to either body.
pub trait ContactFilter {
    fn should_resolve(&self, pair: &ContactPair<'_>) -> bool;
}

impl<F> ContactFilter for F
where
    F: Fn(&ContactPair<'_>) -> bool,
{
    fn should_resolve(&self, pair: &ContactPair<'_>) -> bool {
        self(pair)
    }
}
