#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::missing_panics_doc)]

//! Rod-and-strings sweeper.
//!
//! A rigid rod hangs from a movable overhead frame by two strings whose
//! lengths follow a looping schedule. Scoops under the rod lift pebbles off
//! the floor; a pebble raised past the capture line is removed and counted.
//!
//! ```
//! use rig::{FrameInput, RigConfig, Session};
//!
//! let mut session = Session::new(RigConfig::default()).unwrap();
//! for _ in 0..60 {
//!     session.step(&FrameInput::default(), 1.0 / 60.0).unwrap();
//! }
//! let snapshot = session.snapshot().unwrap();
//! assert_eq!(snapshot.pebbles.len() + snapshot.captured, 250);
//! ```

pub mod config;
pub mod error;
pub mod frame;
pub mod gate;
pub mod input;
pub mod motion;
pub mod pebbles;
pub mod rig;
pub mod session;
pub mod snapshot;
pub mod tension;

pub use config::RigConfig;
pub use error::{ConfigError, RigError};
pub use frame::{Anchors, Frame, RodLimits};
pub use gate::{ScoopGate, PEBBLE, SCOOP};
pub use input::{Control, FrameInput};
pub use motion::{LengthDelta, MotionController, MotionPhase, PhaseSchedule, PhaseSegment};
pub use pebbles::PebbleField;
pub use rig::{Rig, Side};
pub use session::{FrameReport, Session};
pub use snapshot::{PebbleInstance, RodPose, Snapshot, Stats};
pub use tension::{TensionArrow, TensionEstimator, TensionReading};
