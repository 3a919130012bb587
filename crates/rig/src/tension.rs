//! String tension from joint impulses, plus the clamped arrow used to draw it.

use glam::Vec2;
use tracing::warn;

use crate::config::TensionConfig;

/// Attachment-to-anchor spans shorter than this have no direction
const MIN_SPAN: f32 = 1e-4;

/// Tension of one string for one frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TensionReading {
    /// Constraint impulse divided by the step length
    pub tension: f32,
    /// Arrow length in `[0, max_visual]`
    pub magnitude: f32,
    pub arrow: Option<TensionArrow>,
}

/// Arrow drawn from the rod attachment toward the anchor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TensionArrow {
    pub start: Vec2,
    pub end: Vec2,
    pub head: [Vec2; 2],
}

#[derive(Debug, Clone, PartialEq)]
pub struct TensionEstimator {
    config: TensionConfig,
}

impl TensionEstimator {
    #[must_use]
    pub const fn new(config: TensionConfig) -> Self {
        Self { config }
    }

    /// Impulse over step length; zero when the step had no duration
    #[must_use]
    pub fn estimate(impulse: f32, dt: f32) -> f32 {
        if dt > 0.0 {
            impulse / dt
        } else {
            0.0
        }
    }

    /// Map a tension linearly from `[min, max]` onto `[0, max_visual]`,
    /// clamping first. NaN maps to zero.
    #[must_use]
    pub fn visual_magnitude(&self, tension: f32) -> f32 {
        let TensionConfig {
            min, max, max_visual, ..
        } = self.config;
        let clamped = tension.max(min).min(max);
        (clamped - min) / (max - min) * max_visual
    }

    /// `None` when the attachment coincides with the anchor
    #[must_use]
    pub fn arrow(&self, attachment: Vec2, anchor: Vec2, magnitude: f32) -> Option<TensionArrow> {
        let span = anchor - attachment;
        let length = span.length();
        if length.is_nan() || length <= MIN_SPAN {
            warn!(?attachment, ?anchor, "degenerate string, no tension arrow");
            return None;
        }
        let direction = span / length;
        let end = attachment + direction * magnitude;
        let back = end - direction * self.config.arrowhead;
        let side = direction.perp() * self.config.arrowhead;
        Some(TensionArrow {
            start: attachment,
            end,
            head: [back + side, back - side],
        })
    }

    #[must_use]
    pub fn read(&self, impulse: f32, dt: f32, attachment: Vec2, anchor: Vec2) -> TensionReading {
        let tension = Self::estimate(impulse, dt);
        let magnitude = self.visual_magnitude(tension);
        TensionReading {
            tension,
            magnitude,
            arrow: self.arrow(attachment, anchor, magnitude),
        }
    }
}
