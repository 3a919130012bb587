use std::path::PathBuf;

use physics::PhysicsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must be non-negative, got {value}")]
    Negative { field: &'static str, value: f32 },
    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f32 },
    #[error("world.solver_iterations must be at least 1")]
    NoSolverIterations,
    #[error("tension range is empty: min {min} is not below max {max}")]
    EmptyTensionRange { min: f32, max: f32 },
    #[error("attachment margin {margin} leaves no rod between the attachments (length {length})")]
    AttachmentMargin { margin: f32, length: f32 },
    #[error("capture height fraction {0} is outside [0, 1]")]
    CaptureFraction(f32),
}

#[derive(Error, Debug)]
pub enum RigError {
    #[error("physics engine: {0}")]
    Physics(#[from] PhysicsError),
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),
}
