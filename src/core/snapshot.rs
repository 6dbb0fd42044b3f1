use serde::{Deserialize, Serialize};
use crate::core::OverlayIcon;

/// Duration reported when the engine does not know it yet
pub const UNKNOWN_DURATION_MS: u64 = 1;

/// Latest sampled playback progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    /// Playback position in milliseconds
    pub position_ms: u64,

    /// Media duration in milliseconds, never zero
    pub duration_ms: u64,

    /// Whether the engine is currently playing
    pub is_playing: bool,
}

impl Default for ProgressSnapshot {
    fn default() -> Self {
        Self {
            position_ms: 0,
            duration_ms: UNKNOWN_DURATION_MS,
            is_playing: false,
        }
    }
}

impl ProgressSnapshot {
    /// Build a snapshot from raw engine readings. A non-positive duration
    /// becomes [`UNKNOWN_DURATION_MS`].
    pub fn from_raw(position_ms: u64, raw_duration_ms: i64, is_playing: bool) -> Self {
        let duration_ms = if raw_duration_ms > 0 {
            raw_duration_ms as u64
        } else {
            UNKNOWN_DURATION_MS
        };

        Self {
            position_ms,
            duration_ms,
            is_playing,
        }
    }

    /// Fraction of the clip already played, in `[0.0, 1.0]`
    pub fn ratio(&self) -> f32 {
        let duration = self.duration_ms.max(UNKNOWN_DURATION_MS) as f64;
        (self.position_ms as f64 / duration).clamp(0.0, 1.0) as f32
    }
}

/// Everything the view needs to draw one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub progress: ProgressSnapshot,
    pub overlay: OverlayIcon,
}
