//! Rig configuration.
//!
//! Every field defaults to the reference rig, so a JSON document only needs
//! to name what it overrides. Lengths are in world units (pixels, +y toward
//! the floor); `world.pixels_per_meter` is only used to report metres.

use std::path::Path;

use physics::{PhysParams, Vec2};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RigConfig {
    pub world: WorldConfig,
    pub frame: FrameConfig,
    pub rod: RodConfig,
    pub strings: StringConfig,
    pub scoops: ScoopConfig,
    pub pebbles: PebbleConfig,
    pub capture: CaptureConfig,
    pub motion: MotionConfig,
    pub tension: TensionConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorldConfig {
    /// Floor and ceiling span `[0, screen_width]`
    pub screen_width: f32,
    pub pixels_per_meter: f32,
    pub gravity: [f32; 2],
    pub solver_iterations: usize,
    /// Thickness radius of the floor and ceiling segments
    pub boundary_radius: f32,
    /// Distance of the floor line above the frame's bottom edge
    pub floor_inset: f32,
    pub floor_friction: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            screen_width: 2000.0,
            pixels_per_meter: 800.0,
            gravity: [0.0, 763.0],
            solver_iterations: 10,
            boundary_radius: 5.0,
            floor_inset: 5.0,
            floor_friction: 0.0,
        }
    }
}

/// The movable overhead frame ("box") the strings hang from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FrameConfig {
    pub width: f32,
    pub height: f32,
    pub center: [f32; 2],
    /// Horizontal speed under directional input
    pub speed: f32,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 240.0,
            center: [200.0, 500.0],
            speed: 60.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RodConfig {
    pub length: f32,
    pub mass: f32,
    pub radius: f32,
    /// Distance of each string attachment in from its rod end
    pub attach_margin: f32,
    /// Exponential decay constant applied to the rod's angular velocity
    pub angular_damping: f32,
    /// Soft limit below the ceiling past which upward velocity is zeroed
    pub top_limit_offset: f32,
    /// Soft limit above the floor past which downward velocity is zeroed
    pub bottom_limit_offset: f32,
}

impl Default for RodConfig {
    fn default() -> Self {
        Self {
            length: 240.0,
            mass: 0.5,
            radius: 5.0,
            attach_margin: 64.0,
            angular_damping: 3.0,
            top_limit_offset: 20.0,
            bottom_limit_offset: 5.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StringConfig {
    pub min_length: f32,
    /// Length change per second while a manual control is held
    pub manual_rate: f32,
}

impl Default for StringConfig {
    fn default() -> Self {
        Self {
            min_length: 10.0,
            manual_rate: 80.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoopConfig {
    pub count: usize,
    pub arm_length: f32,
    pub radius: f32,
    pub friction: f32,
}

impl Default for ScoopConfig {
    fn default() -> Self {
        Self {
            count: 12,
            arm_length: 15.0,
            radius: 2.0,
            friction: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PebbleConfig {
    pub radius: f32,
    pub mass: f32,
    pub friction: f32,
    pub restitution: f32,
    /// Gap between the floor line and a freshly spawned pebble's bottom
    pub clearance: f32,
    /// Defaults to as many pebbles as fit across the floor
    pub count: Option<usize>,
}

impl Default for PebbleConfig {
    fn default() -> Self {
        Self {
            radius: 4.0,
            mass: 0.1,
            friction: 5.0,
            restitution: 0.8,
            clearance: 5.0,
            count: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CaptureConfig {
    /// Capture line height above the frame centre, as a fraction of frame height
    pub height_fraction: f32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self { height_fraction: 0.25 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MotionConfig {
    /// When false only manual controls change the string lengths
    pub enabled: bool,
    /// `r0`, used throughout INIT
    pub init_rate: f32,
    /// `r1`, used for the first three SWEEP sub-phases
    pub sweep_rate: f32,
    /// `r2 = recovery_factor * r1`, used for the last SWEEP sub-phase
    pub recovery_factor: f32,
    pub init_durations: [f32; 2],
    pub sweep_durations: [f32; 4],
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            init_rate: 80.0,
            sweep_rate: 40.0,
            recovery_factor: 2.0,
            init_durations: [0.25, 0.25],
            sweep_durations: [1.56, 2.0, 1.56, 1.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TensionConfig {
    pub min: f32,
    pub max: f32,
    /// Arrow length at `max` tension
    pub max_visual: f32,
    pub arrowhead: f32,
}

impl Default for TensionConfig {
    fn default() -> Self {
        Self {
            min: 200.0,
            max: 10_000.0,
            max_visual: 500.0,
            arrowhead: 10.0,
        }
    }
}

impl RigConfig {
    /// Parse and validate a JSON document
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown fields and
    /// a validation variant for out-of-range values.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`RigConfig::from_json_str`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("world.screen_width", self.world.screen_width),
            ("world.pixels_per_meter", self.world.pixels_per_meter),
            ("frame.width", self.frame.width),
            ("frame.height", self.frame.height),
            ("rod.length", self.rod.length),
            ("rod.mass", self.rod.mass),
            ("rod.radius", self.rod.radius),
            ("strings.min_length", self.strings.min_length),
            ("scoops.radius", self.scoops.radius),
            ("pebbles.radius", self.pebbles.radius),
            ("pebbles.mass", self.pebbles.mass),
            ("motion.init_durations[0]", self.motion.init_durations[0]),
            ("motion.init_durations[1]", self.motion.init_durations[1]),
            ("motion.sweep_durations[0]", self.motion.sweep_durations[0]),
            ("motion.sweep_durations[1]", self.motion.sweep_durations[1]),
            ("motion.sweep_durations[2]", self.motion.sweep_durations[2]),
            ("motion.sweep_durations[3]", self.motion.sweep_durations[3]),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        let non_negative = [
            ("world.boundary_radius", self.world.boundary_radius),
            ("world.floor_inset", self.world.floor_inset),
            ("world.floor_friction", self.world.floor_friction),
            ("frame.speed", self.frame.speed),
            ("rod.angular_damping", self.rod.angular_damping),
            ("rod.top_limit_offset", self.rod.top_limit_offset),
            ("rod.bottom_limit_offset", self.rod.bottom_limit_offset),
            ("strings.manual_rate", self.strings.manual_rate),
            ("scoops.arm_length", self.scoops.arm_length),
            ("scoops.friction", self.scoops.friction),
            ("pebbles.friction", self.pebbles.friction),
            ("pebbles.restitution", self.pebbles.restitution),
            ("pebbles.clearance", self.pebbles.clearance),
            ("motion.init_rate", self.motion.init_rate),
            ("motion.sweep_rate", self.motion.sweep_rate),
            ("motion.recovery_factor", self.motion.recovery_factor),
            ("tension.max_visual", self.tension.max_visual),
            ("tension.arrowhead", self.tension.arrowhead),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }
        for (field, value) in [
            ("world.gravity[0]", self.world.gravity[0]),
            ("world.gravity[1]", self.world.gravity[1]),
            ("frame.center[0]", self.frame.center[0]),
            ("frame.center[1]", self.frame.center[1]),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field, value });
            }
        }

        if self.world.solver_iterations == 0 {
            return Err(ConfigError::NoSolverIterations);
        }
        if !self.tension.max.is_finite() || !self.tension.min.is_finite() || self.tension.max <= self.tension.min {
            return Err(ConfigError::EmptyTensionRange {
                min: self.tension.min,
                max: self.tension.max,
            });
        }
        let margin = self.rod.attach_margin;
        if margin.is_nan() || margin < 0.0 || margin * 2.0 >= self.rod.length {
            return Err(ConfigError::AttachmentMargin {
                margin: self.rod.attach_margin,
                length: self.rod.length,
            });
        }
        if !(0.0..=1.0).contains(&self.capture.height_fraction) {
            return Err(ConfigError::CaptureFraction(self.capture.height_fraction));
        }
        Ok(())
    }

    /// Solver parameters for the engine
    #[must_use]
    pub fn phys_params(&self) -> PhysParams {
        PhysParams {
            gravity: Vec2::from(self.world.gravity),
            iterations: self.world.solver_iterations,
            ..PhysParams::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_defaults_are_valid() {
        assert!(RigConfig::default().validate().is_ok());
    }

    #[test]
    fn sweep_thresholds_match_reference_cycle() {
        let durations = MotionConfig::default().sweep_durations;
        let t4: f32 = durations.iter().sum();
        assert!((t4 - 6.12).abs() < 1e-5);
    }
}
