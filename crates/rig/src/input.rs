use serde::{Deserialize, Serialize};

/// Controls held during one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub shorten_left: bool,
    pub lengthen_left: bool,
    pub shorten_right: bool,
    pub lengthen_right: bool,
    pub frame_left: bool,
    pub frame_right: bool,
    /// Applied at the start of the frame, before any other control
    pub reset: bool,
    pub quit: bool,
}

/// A single named control, as written in input scripts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Control {
    ShortenLeft,
    LengthenLeft,
    ShortenRight,
    LengthenRight,
    FrameLeft,
    FrameRight,
    Reset,
    Quit,
}

impl FrameInput {
    pub fn hold(&mut self, control: Control) {
        match control {
            Control::ShortenLeft => self.shorten_left = true,
            Control::LengthenLeft => self.lengthen_left = true,
            Control::ShortenRight => self.shorten_right = true,
            Control::LengthenRight => self.lengthen_right = true,
            Control::FrameLeft => self.frame_left = true,
            Control::FrameRight => self.frame_right = true,
            Control::Reset => self.reset = true,
            Control::Quit => self.quit = true,
        }
    }

    #[must_use]
    pub fn with(mut self, control: Control) -> Self {
        self.hold(control);
        self
    }

    /// -1, 0 or +1 along x; opposing controls cancel
    #[must_use]
    pub fn frame_direction(&self) -> f32 {
        f32::from(i8::from(self.frame_right) - i8::from(self.frame_left))
    }
}
