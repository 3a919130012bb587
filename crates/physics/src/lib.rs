#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! # Rodsweep Physics Engine
//!
//! A small 2D rigid body engine used as the dynamics backend of the rodsweep
//! rig. It knows nothing about rods, strings or pebbles: it maintains bodies,
//! capsule-style colliders and distance joints, and advances them with a
//! sequential-impulse solver.
//!
//! ## Key Components
//!
//! -   **Bodies and colliders:** [`RigidBody`] carries the pose and velocity
//!     state; each body owns any number of [`Collider`]s (circles and
//!     segments with a thickness radius), tagged with a [`CollisionTag`].
//! -   **Distance joints:** [`DistanceJoint`] pins a body-local point to a
//!     world anchor at a mutable target distance and reports the impulse it
//!     applied during the last step.
//! -   **Contact filters:** a [`ContactFilter`] registered for a pair of
//!     collision tags is consulted before every contact between colliders
//!     carrying those tags is resolved.
//! -   **Simulation:** [`PhysicsSim`] owns everything above behind
//!     generational handles and exposes [`PhysicsSim::step`].
//!
//! ## Usage
//!
//! ```rust
//! use physics::{Collider, PhysicsSim, RigidBody, Vec2};
//!
//! let mut sim = PhysicsSim::new();
//! sim.params.gravity = Vec2::new(0.0, 763.0);
//! let ball = sim.add_body(RigidBody::dynamic(Vec2::new(0.0, 0.0), 1.0, 1.0));
//! sim.add_collider(ball, Collider::circle(Vec2::ZERO, 4.0)).unwrap();
//! sim.step(1.0 / 60.0);
//! assert!(sim.body(ball).unwrap().pos.y > 0.0);
//! ```

pub mod arena;
pub mod builder;
pub mod collision;
pub mod error;
pub mod integrator;
pub mod simulation;
mod steps;
pub mod types;

pub use arena::{Arena, Handle};
pub use builder::{moment_for_circle, moment_for_segment};
pub use collision::{Contact, ContactFilter, ContactPair};
pub use error::PhysicsError;
pub use glam::Vec2;
pub use simulation::{PhysicsSim, SimStats};
pub use types::{
    AttachedCollider, BodyHandle, BodyType, Collider, ColliderHandle, CollisionTag, DistanceJoint,
    JointHandle, Material, PhysParams, RigidBody, Shape,
};
