//! # Rodsweep
//!
//! A rigid rod hangs from a movable overhead frame by two strings. A looping
//! schedule shortens and lengthens the strings so L-shaped scoops under the
//! rod dig into a row of pebbles and lift them. Pebbles raised past the
//! capture line are removed and counted.
//!
//! ## The Crates
//!
//! -   **`rodsweep`:** This crate. The headless driver: command line, input
//!     scripts, config hot-reloading and the frame loop.
//! -   **[`rig`]:** The sweeper itself. Configuration, the motion schedule,
//!     the scoop contact gate, tension estimation, pebble bookkeeping and
//!     the [`rig::Session`] that steps them in order.
//! -   **[`physics`]:** A small 2D rigid body engine: capsule colliders,
//!     distance joints, tag-pair contact filters and a sequential impulse
//!     solver.

pub mod app;
pub mod script;
pub mod watcher;

pub use physics;
pub use rig;
