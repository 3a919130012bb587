//! Capsule-capsule narrow phase

use glam::Vec2;

use super::Contact;
use crate::types::{BodyHandle, CollisionTag, Material};

const EPSILON: f32 = 1e-6;

/// A collider resolved into world space for one step
#[derive(Debug, Clone, Copy)]
pub(crate) struct WorldCapsule {
    pub body: BodyHandle,
    pub a: Vec2,
    pub b: Vec2,
    pub radius: f32,
    pub material: Material,
    pub tag: CollisionTag,
    pub dynamic: bool,
}

impl WorldCapsule {
    pub fn bounds(&self) -> (Vec2, Vec2) {
        let r = Vec2::splat(self.radius);
        (self.a.min(self.b) - r, self.a.max(self.b) + r)
    }
}

/// Detect overlap between two capsules
pub(crate) fn capsule_contact(first: &WorldCapsule, second: &WorldCapsule) -> Option<Contact> {
    let (on_first, on_second) = closest_points(first.a, first.b, second.a, second.b);
    let delta = on_second - on_first;
    let min_distance = first.radius + second.radius;
    let distance_squared = delta.length_squared();

    if distance_squared >= min_distance * min_distance {
        return None;
    }

    let distance = distance_squared.sqrt();
    let normal = if distance > EPSILON {
        delta / distance
    } else {
        fallback_normal(first)
    };
    let depth = min_distance - distance;
    let point = on_first + normal * (first.radius - depth * 0.5);

    Some(Contact::new(point, normal, depth, &first.material, &second.material))
}

/// Normal used when the two core segments intersect
fn fallback_normal(capsule: &WorldCapsule) -> Vec2 {
    let axis = capsule.b - capsule.a;
    if axis.length_squared() > EPSILON {
        axis.perp().normalize()
    } else {
        Vec2::Y
    }
}

/// Closest points between segments `p1q1` and `p2q2`
fn closest_points(p1: Vec2, q1: Vec2, p2: Vec2, q2: Vec2) -> (Vec2, Vec2) {
    let d1 = q1 - p1;
    let d2 = q2 - p2;
    let r = p1 - p2;
    let a = d1.length_squared();
    let e = d2.length_squared();
    let f = d2.dot(r);

    if a <= EPSILON && e <= EPSILON {
        return (p1, p2);
    }

    let (s, t) = if a <= EPSILON {
        (0.0, (f / e).clamp(0.0, 1.0))
    } else {
        let c = d1.dot(r);
        if e <= EPSILON {
            ((-c / a).clamp(0.0, 1.0), 0.0)
        } else {
            let b = d1.dot(d2);
            let denom = a * e - b * b;
            let s = if denom > EPSILON {
                ((b * f - c * e) / denom).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let t = (b * s + f) / e;
            if t < 0.0 {
                ((-c / a).clamp(0.0, 1.0), 0.0)
            } else if t > 1.0 {
                (((b - c) / a).clamp(0.0, 1.0), 1.0)
            } else {
                (s, t)
            }
        }
    };

    (p1 + d1 * s, p2 + d2 * t)
}
