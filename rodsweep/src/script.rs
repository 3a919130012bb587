//! Scripted input for headless runs.
//!
//! A script is a JSON list of timed events:
//!
//! ```json
//! [
//!   { "hold": "frame_right", "from": 1.0, "until": 3.5 },
//!   { "reset_at": 8.0 },
//!   { "quit_at": 20.0 }
//! ]
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use rig::{Control, FrameInput};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ScriptEvent {
    /// Hold `control` for session times in `[from, until)`
    Hold { hold: Control, from: f32, until: f32 },
    /// Reset on the frame whose interval contains this time
    ResetAt { reset_at: f32 },
    /// Stop before the first frame starting at or after this time
    QuitAt { quit_at: f32 },
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct InputScript {
    events: Vec<ScriptEvent>,
}

impl InputScript {
    /// # Errors
    ///
    /// Fails on malformed JSON or an unrecognised event.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("invalid input script")
    }

    /// # Errors
    ///
    /// Fails if the file cannot be read or does not parse.
    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read input script {}", path.display()))?;
        Self::from_json_str(&json)
    }

    #[must_use]
    pub fn events(&self) -> &[ScriptEvent] {
        &self.events
    }

    /// Controls for the frame covering `[time, time + dt)`
    #[must_use]
    pub fn frame_input(&self, time: f32, dt: f32) -> FrameInput {
        let mut input = FrameInput::default();
        for event in &self.events {
            match *event {
                ScriptEvent::Hold { hold, from, until } => {
                    if from <= time && time < until {
                        input.hold(hold);
                    }
                }
                ScriptEvent::ResetAt { reset_at } => {
                    if time <= reset_at && reset_at < time + dt {
                        input.hold(Control::Reset);
                    }
                }
                ScriptEvent::QuitAt { quit_at } => {
                    if time >= quit_at {
                        input.hold(Control::Quit);
                    }
                }
            }
        }
        input
    }
}
