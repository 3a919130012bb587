//! The sweeper itself: a rod hanging from two strings, with L-shaped scoops
//! along its underside.

use glam::Vec2;
use physics::{
    moment_for_segment, BodyHandle, Collider, ColliderHandle, JointHandle, Material, PhysicsError,
    PhysicsSim, RigidBody,
};
use tracing::debug;

use crate::config::RigConfig;
use crate::frame::{Anchors, Frame};
use crate::gate::SCOOP;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Self; 2] = [Self::Left, Self::Right];

    const fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
        }
    }
}

/// One string: a distance joint from a rod-local attachment to a frame corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StringConstraint {
    pub side: Side,
    joint: JointHandle,
    attachment: Vec2,
}

impl StringConstraint {
    #[must_use]
    pub const fn joint(&self) -> JointHandle {
        self.joint
    }

    /// Attachment point in rod-local coordinates
    #[must_use]
    pub const fn attachment(&self) -> Vec2 {
        self.attachment
    }

    /// Target length of the string
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::StaleJoint`] after teardown.
    pub fn length(&self, sim: &PhysicsSim) -> Result<f32, PhysicsError> {
        Ok(sim.joint(self.joint).ok_or(PhysicsError::StaleJoint(self.joint))?.distance)
    }

    /// # Errors
    ///
    /// Returns [`PhysicsError::StaleJoint`] after teardown.
    pub fn anchor(&self, sim: &PhysicsSim) -> Result<Vec2, PhysicsError> {
        Ok(sim
            .joint(self.joint)
            .ok_or(PhysicsError::StaleJoint(self.joint))?
            .world_anchor)
    }

    /// Impulse the joint applied during the last step
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::StaleJoint`] after teardown.
    pub fn impulse(&self, sim: &PhysicsSim) -> Result<f32, PhysicsError> {
        Ok(sim.joint(self.joint).ok_or(PhysicsError::StaleJoint(self.joint))?.impulse())
    }
}

/// A scoop arm in rod-local coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoopSegment {
    pub collider: ColliderHandle,
    pub a: Vec2,
    pub b: Vec2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rig {
    rod: BodyHandle,
    half_length: f32,
    strings: [StringConstraint; 2],
    scoops: Vec<ScoopSegment>,
    min_length: f32,
}

impl Rig {
    /// Create the rod at the frame centre, its collider, the scoops and both
    /// strings. Initial string lengths are the attachment-to-anchor distances
    /// of this rest pose.
    ///
    /// # Errors
    ///
    /// Only fails if the engine rejects the freshly created rod.
    pub fn build(sim: &mut PhysicsSim, config: &RigConfig, frame: &Frame) -> Result<Self, PhysicsError> {
        let rod_config = &config.rod;
        let half_length = rod_config.length / 2.0;
        let end_a = Vec2::new(-half_length, 0.0);
        let end_b = Vec2::new(half_length, 0.0);

        let inertia = moment_for_segment(rod_config.mass, end_a, end_b, rod_config.radius);
        let rod = sim.add_body(RigidBody::dynamic(frame.center, rod_config.mass, inertia));
        sim.add_collider(rod, Collider::segment(end_a, end_b, rod_config.radius))?;

        let scoops = Self::attach_scoops(sim, rod, config)?;

        let anchors = frame.anchors();
        let inset = half_length - rod_config.attach_margin;
        let mut string = |side: Side, attachment: Vec2, anchor: Vec2| -> Result<StringConstraint, PhysicsError> {
            let distance = sim.local_to_world(rod, attachment)?.distance(anchor);
            let joint = sim.add_distance_joint(rod, attachment, anchor, distance)?;
            Ok(StringConstraint {
                side,
                joint,
                attachment,
            })
        };
        let strings = [
            string(Side::Left, Vec2::new(-inset, 0.0), anchors.left)?,
            string(Side::Right, Vec2::new(inset, 0.0), anchors.right)?,
        ];

        debug!(?rod, scoops = scoops.len(), "rig built");
        Ok(Self {
            rod,
            half_length,
            strings,
            scoops,
            min_length: config.strings.min_length,
        })
    }

    /// Evenly spaced L-shapes: a vertical arm hanging from the rod and a
    /// horizontal arm pointing toward +x at its foot.
    #[allow(clippy::cast_precision_loss)]
    fn attach_scoops(
        sim: &mut PhysicsSim,
        rod: BodyHandle,
        config: &RigConfig,
    ) -> Result<Vec<ScoopSegment>, PhysicsError> {
        let scoop = &config.scoops;
        let length = config.rod.length;
        let arm = scoop.arm_length;
        let material = Material::new(scoop.friction, 0.0);

        let mut segments = Vec::with_capacity(scoop.count * 2);
        for i in 0..scoop.count {
            let x = (i as f32 / scoop.count as f32) * length - length / 2.0;
            let foot = Vec2::new(x, arm);
            for (a, b) in [(Vec2::new(x, 0.0), foot), (foot, Vec2::new(x + arm, arm))] {
                let collider = sim.add_collider(
                    rod,
                    Collider::segment(a, b, scoop.radius)
                        .with_material(material)
                        .with_tag(SCOOP),
                )?;
                segments.push(ScoopSegment { collider, a, b });
            }
        }
        Ok(segments)
    }

    #[must_use]
    pub const fn rod(&self) -> BodyHandle {
        self.rod
    }

    #[must_use]
    pub const fn string(&self, side: Side) -> &StringConstraint {
        &self.strings[side.index()]
    }

    #[must_use]
    pub const fn strings(&self) -> &[StringConstraint; 2] {
        &self.strings
    }

    #[must_use]
    pub fn scoops(&self) -> &[ScoopSegment] {
        &self.scoops
    }

    #[must_use]
    pub const fn min_length(&self) -> f32 {
        self.min_length
    }

    /// Change a string's length by `delta`, never going below the minimum.
    /// Returns the new length.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::StaleJoint`] after teardown.
    pub fn adjust_length(&self, sim: &mut PhysicsSim, side: Side, delta: f32) -> Result<f32, PhysicsError> {
        let handle = self.string(side).joint;
        let joint = sim.joint_mut(handle).ok_or(PhysicsError::StaleJoint(handle))?;
        joint.distance = (joint.distance + delta).max(self.min_length);
        Ok(joint.distance)
    }

    /// Re-pin both strings to the frame's current corners
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::StaleJoint`] after teardown.
    pub fn set_anchors(&self, sim: &mut PhysicsSim, anchors: Anchors) -> Result<(), PhysicsError> {
        for (string, anchor) in self.strings.iter().zip([anchors.left, anchors.right]) {
            let joint = sim
                .joint_mut(string.joint)
                .ok_or(PhysicsError::StaleJoint(string.joint))?;
            joint.world_anchor = anchor;
        }
        Ok(())
    }

    /// World-space rod ends
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::StaleBody`] after teardown.
    pub fn endpoints(&self, sim: &PhysicsSim) -> Result<(Vec2, Vec2), PhysicsError> {
        Ok((
            sim.local_to_world(self.rod, Vec2::new(-self.half_length, 0.0))?,
            sim.local_to_world(self.rod, Vec2::new(self.half_length, 0.0))?,
        ))
    }

    /// Removing the rod takes its colliders and both strings with it
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::StaleBody`] if the rig was already torn down.
    pub fn teardown(&self, sim: &mut PhysicsSim) -> Result<(), PhysicsError> {
        sim.remove_body(self.rod)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn built() -> (PhysicsSim, Rig) {
        let config = RigConfig::default();
        let mut sim = PhysicsSim::with_params(config.phys_params());
        let rig = Rig::build(&mut sim, &config, &Frame::from_config(&config)).unwrap();
        (sim, rig)
    }

    #[test]
    fn lengths_clamp_at_minimum() {
        let (mut sim, rig) = built();
        assert_eq!(rig.adjust_length(&mut sim, Side::Left, -1e6).unwrap(), 10.0);
        assert_eq!(rig.adjust_length(&mut sim, Side::Left, 2.5).unwrap(), 12.5);
        let right = rig.string(Side::Right).length(&sim).unwrap();
        assert!(right > 300.0);
    }

    #[test]
    fn teardown_removes_rod_scoops_and_strings() {
        let (mut sim, rig) = built();
        assert_eq!(sim.stats().colliders, 1 + 24);
        assert_eq!(sim.stats().joints, 2);
        rig.teardown(&mut sim).unwrap();
        let stats = sim.stats();
        assert_eq!((stats.bodies, stats.colliders, stats.joints), (0, 0, 0));
        assert!(rig.teardown(&mut sim).is_err());
    }
}
