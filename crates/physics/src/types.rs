//! Core engine data types: bodies, colliders, joints and solver parameters.

use glam::Vec2;

use crate::arena::Handle;

pub type BodyHandle = Handle<RigidBody>;
pub type ColliderHandle = Handle<AttachedCollider>;
pub type JointHandle = Handle<DistanceJoint>;

/// How a body participates in the simulation
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BodyType {
    /// Integrated under gravity, constraints and contacts
    Dynamic,
    /// Never moves; infinite mass
    Static,
}

/// Rigid body state in 2D
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RigidBody {
    pub body_type: BodyType,
    pub pos: Vec2,
    /// Orientation in radians
    pub angle: f32,
    pub vel: Vec2,
    pub angular_vel: f32,
    pub mass: f32,
    /// Moment of inertia about the body origin
    pub inertia: f32,
}

impl RigidBody {
    /// Dynamic body at rest
    #[must_use]
    pub const fn dynamic(pos: Vec2, mass: f32, inertia: f32) -> Self {
        Self {
            body_type: BodyType::Dynamic,
            pos,
            angle: 0.0,
            vel: Vec2::ZERO,
            angular_vel: 0.0,
            mass,
            inertia,
        }
    }

    /// Static body; its colliders are expressed relative to `pos`
    #[must_use]
    pub const fn fixed(pos: Vec2) -> Self {
        Self {
            body_type: BodyType::Static,
            pos,
            angle: 0.0,
            vel: Vec2::ZERO,
            angular_vel: 0.0,
            mass: f32::INFINITY,
            inertia: f32::INFINITY,
        }
    }

    #[must_use]
    pub fn is_dynamic(&self) -> bool {
        self.body_type == BodyType::Dynamic
    }

    #[must_use]
    pub fn inv_mass(&self) -> f32 {
        if self.is_dynamic() && self.mass > 0.0 {
            1.0 / self.mass
        } else {
            0.0
        }
    }

    #[must_use]
    pub fn inv_inertia(&self) -> f32 {
        if self.is_dynamic() && self.inertia > 0.0 {
            1.0 / self.inertia
        } else {
            0.0
        }
    }

    /// Unit vector of the body's rotation
    #[must_use]
    pub fn rotation(&self) -> Vec2 {
        Vec2::from_angle(self.angle)
    }

    /// Rotate a body-local offset into world orientation (no translation)
    #[must_use]
    pub fn rotate(&self, local: Vec2) -> Vec2 {
        self.rotation().rotate(local)
    }

    /// Transform a body-local point to world coordinates
    #[must_use]
    pub fn local_to_world(&self, local: Vec2) -> Vec2 {
        self.pos + self.rotate(local)
    }

    /// Velocity of the material point currently at `world`
    #[must_use]
    pub fn velocity_at(&self, world: Vec2) -> Vec2 {
        self.vel + (world - self.pos).perp() * self.angular_vel
    }
}

/// Surface properties used when two colliders touch
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Material {
    pub friction: f32,
    pub restitution: f32,
}

impl Material {
    #[must_use]
    pub const fn new(friction: f32, restitution: f32) -> Self {
        Self {
            friction,
            restitution,
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Label used to select contact filters. Tag 0 is the default.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollisionTag(pub u32);

impl CollisionTag {
    pub const DEFAULT: Self = Self(0);
}

/// Collision geometry in body-local coordinates
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Shape {
    Circle { center: Vec2, radius: f32 },
    /// Segment swept by a disc of `radius` (a capsule)
    Segment { a: Vec2, b: Vec2, radius: f32 },
}

impl Shape {
    /// Core segment and radius; a circle is a zero-length segment
    #[must_use]
    pub const fn capsule(&self) -> (Vec2, Vec2, f32) {
        match *self {
            Self::Circle { center, radius } => (center, center, radius),
            Self::Segment { a, b, radius } => (a, b, radius),
        }
    }
}

/// Collider description, attached to a body through
/// [`PhysicsSim::add_collider`](crate::PhysicsSim::add_collider)
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Collider {
    pub shape: Shape,
    pub material: Material,
    pub tag: CollisionTag,
}

impl Collider {
    #[must_use]
    pub fn circle(center: Vec2, radius: f32) -> Self {
        Self {
            shape: Shape::Circle { center, radius },
            material: Material::default(),
            tag: CollisionTag::DEFAULT,
        }
    }

    #[must_use]
    pub fn segment(a: Vec2, b: Vec2, radius: f32) -> Self {
        Self {
            shape: Shape::Segment { a, b, radius },
            material: Material::default(),
            tag: CollisionTag::DEFAULT,
        }
    }

    #[must_use]
    pub const fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    #[must_use]
    pub const fn with_tag(mut self, tag: CollisionTag) -> Self {
        self.tag = tag;
        self
    }
}

/// A collider together with the body that owns it
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AttachedCollider {
    pub body: BodyHandle,
    pub collider: Collider,
}

/// Pins a body-local point to a world-space anchor at a fixed distance
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DistanceJoint {
    pub body: BodyHandle,
    pub local_anchor: Vec2,
    pub world_anchor: Vec2,
    /// Target distance; the caller keeps it positive
    pub distance: f32,
    pub(crate) impulse: f32,
}

impl DistanceJoint {
    #[must_use]
    pub const fn new(body: BodyHandle, local_anchor: Vec2, world_anchor: Vec2, distance: f32) -> Self {
        Self {
            body,
            local_anchor,
            world_anchor,
            distance,
            impulse: 0.0,
        }
    }

    /// Magnitude of the impulse applied by this joint during the last step
    #[must_use]
    pub const fn impulse(&self) -> f32 {
        self.impulse
    }
}

/// Global solver parameters
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PhysParams {
    pub gravity: Vec2,
    /// Velocity iterations per step
    pub iterations: usize,
    /// Penetration tolerated before positional bias kicks in
    pub collision_slop: f32,
    /// Fraction of positional error fed back per step
    pub bias_factor: f32,
    /// Approach speed below which restitution is ignored
    pub bounce_threshold: f32,
    /// Upper bound on a joint's corrective velocity
    pub joint_max_bias: f32,
    /// Edge length of a broad-phase grid cell
    pub grid_cell_size: f32,
}

impl Default for PhysParams {
    fn default() -> Self {
        Self {
            gravity: Vec2::ZERO,
            iterations: 10,
            collision_slop: 0.1,
            bias_factor: 0.1,
            bounce_threshold: 1.0,
            joint_max_bias: f32::INFINITY,
            grid_cell_size: 32.0,
        }
    }
}
