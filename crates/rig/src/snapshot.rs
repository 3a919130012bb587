//! Read-only view of a session for presentation and logging.

use std::fmt;

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::frame::Frame;
use crate::motion::MotionPhase;
use crate::rig::Side;
use crate::tension::TensionReading;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RodPose {
    pub position: Vec2,
    pub angle: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StringView {
    pub side: Side,
    pub anchor: Vec2,
    /// World-space attachment on the rod
    pub attachment: Vec2,
    pub length: f32,
    pub tension: TensionReading,
}

/// GPU-friendly pebble record, one per live pebble
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct PebbleInstance {
    pub position: [f32; 2],
    pub radius: f32,
    pub _padding: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub rod: RodPose,
    pub rod_ends: (Vec2, Vec2),
    /// World-space scoop arms
    pub scoops: Vec<(Vec2, Vec2)>,
    pub strings: [StringView; 2],
    pub pebbles: Vec<PebbleInstance>,
    pub frame: Frame,
    pub floor_y: f32,
    pub ceiling_y: f32,
    pub capture_line: f32,
    pub captured: usize,
    pub phase: MotionPhase,
    /// Session time, unaffected by resets
    pub elapsed: f32,
    pub pixels_per_meter: f32,
}

/// The numbers shown next to the rig
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stats {
    pub left_length_m: f32,
    pub right_length_m: f32,
    pub left_tension: f32,
    pub right_tension: f32,
    pub rod_position_m: Vec2,
    /// Degrees in `[0, 360)`
    pub rod_angle_deg: f32,
    pub elapsed: f32,
    pub captured: usize,
}

impl Snapshot {
    #[must_use]
    pub fn string(&self, side: Side) -> &StringView {
        match side {
            Side::Left => &self.strings[0],
            Side::Right => &self.strings[1],
        }
    }

    #[must_use]
    pub fn stats(&self) -> Stats {
        let ppm = self.pixels_per_meter;
        Stats {
            left_length_m: self.strings[0].length / ppm,
            right_length_m: self.strings[1].length / ppm,
            left_tension: self.strings[0].tension.tension,
            right_tension: self.strings[1].tension.tension,
            rod_position_m: self.rod.position / ppm,
            rod_angle_deg: self.rod.angle.to_degrees().rem_euclid(360.0),
            elapsed: self.elapsed,
            captured: self.captured,
        }
    }

    /// Byte view of the pebble instances, ready for a vertex buffer
    #[must_use]
    pub fn pebble_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pebbles)
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Left String Length: {:.2} m", self.left_length_m)?;
        writeln!(f, "Right String Length: {:.2} m", self.right_length_m)?;
        writeln!(f, "Left String Tension: {:.2} N", self.left_tension)?;
        writeln!(f, "Right String Tension: {:.2} N", self.right_tension)?;
        writeln!(
            f,
            "Rod Position: ({:.2}, {:.2}) m",
            self.rod_position_m.x, self.rod_position_m.y
        )?;
        writeln!(f, "Rod Angle: {:.2} degrees", self.rod_angle_deg)?;
        writeln!(f, "Time: {:.2} s", self.elapsed)?;
        write!(f, "Pebbles Captured: {}", self.captured)
    }
}
