//! Directional gate on scoop/pebble contacts.
//!
//! Scoops only carry pebbles while the rod is still or rising. On the way
//! down they pass through pebbles so the sweep can re-engage from above.

use physics::{CollisionTag, ContactFilter, ContactPair};

pub const SCOOP: CollisionTag = CollisionTag(1);
pub const PEBBLE: CollisionTag = CollisionTag(2);

/// Whether a scoop/pebble contact is resolved, given the rod's vertical
/// velocity in the y-down world frame. Non-positive means still or moving
/// toward the ceiling.
#[must_use]
pub fn is_open(rod_vertical_velocity: f32) -> bool {
    rod_vertical_velocity <= 0.0
}

/// Contact filter registered for `(SCOOP, PEBBLE)`
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoopGate;

impl ContactFilter for ScoopGate {
    fn should_resolve(&self, pair: &ContactPair<'_>) -> bool {
        let scoop_body = if pair.tag_a == SCOOP { pair.body_a } else { pair.body_b };
        is_open(scoop_body.vel.y)
    }
}
