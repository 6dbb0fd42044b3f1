pub mod controller;
pub mod hold_seek;
pub mod overlay;
pub mod progress;
mod session;
mod ticker;

pub use controller::{ControllerError, PlaybackInteractionController};
pub use hold_seek::HoldToSeekController;
pub use overlay::OverlaySignal;
pub use progress::ProgressTracker;

use crate::engine::MediaSource;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timing and behaviour of the playback controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// How often position/duration/playing are sampled
    pub poll_interval_ms: u64,
    /// Delay between two steps of a press-and-hold seek
    pub hold_repeat_ms: u64,
    /// Distance covered by one hold step
    pub seek_step_ms: u64,
    /// How long an overlay icon stays up after its last raise
    pub overlay_clear_ms: u64,
    /// Restart clips when they end
    pub looping: bool,
    /// Start playing as soon as the clip is ready
    pub autoplay: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 200,
            hold_repeat_ms: 300,
            seek_step_ms: 1000,
            overlay_clear_ms: 600,
            looping: true,
            autoplay: false,
        }
    }
}

impl PlaybackConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    pub fn hold_repeat(&self) -> Duration {
        Duration::from_millis(self.hold_repeat_ms.max(1))
    }

    pub fn overlay_clear(&self) -> Duration {
        Duration::from_millis(self.overlay_clear_ms)
    }

    /// Media source for `uri` using this config's looping/autoplay flags
    pub fn media_source(&self, uri: &str) -> MediaSource {
        MediaSource {
            uri: uri.to_string(),
            looping: self.looping,
            autoplay: self.autoplay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: PlaybackConfig = serde_json::from_str(r#"{"seek_step_ms": 5000}"#).unwrap();
        assert_eq!(config.seek_step_ms, 5000);
        assert_eq!(config.poll_interval_ms, 200);
        assert_eq!(config.hold_repeat_ms, 300);
        assert_eq!(config.overlay_clear_ms, 600);
        assert!(config.looping);
        assert!(!config.autoplay);
    }

    #[test]
    fn test_zero_intervals_are_not_allowed_to_spin() {
        let config = PlaybackConfig {
            poll_interval_ms: 0,
            hold_repeat_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.poll_interval(), Duration::from_millis(1));
        assert_eq!(config.hold_repeat(), Duration::from_millis(1));
    }
}
