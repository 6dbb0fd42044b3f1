use serde::{Deserialize, Serialize};

/// Transient icon drawn over the video to acknowledge the last action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OverlayIcon {
    #[default]
    None,
    Play,
    Pause,
    Rewind,
    FastForward,
}

impl OverlayIcon {
    /// Whether anything should be drawn
    pub fn is_visible(&self) -> bool {
        *self != OverlayIcon::None
    }

    /// Glyph used by text-based renderers
    pub fn glyph(&self) -> &'static str {
        match self {
            OverlayIcon::None => "",
            OverlayIcon::Play => "▶",
            OverlayIcon::Pause => "⏸",
            OverlayIcon::Rewind => "⏪",
            OverlayIcon::FastForward => "⏩",
        }
    }
}

/// Direction of a press-and-hold seek
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeekDirection {
    /// Left zone
    Rewind,
    /// Right zone
    FastForward,
}

impl SeekDirection {
    /// Icon raised on every step in this direction
    pub fn icon(&self) -> OverlayIcon {
        match self {
            SeekDirection::Rewind => OverlayIcon::Rewind,
            SeekDirection::FastForward => OverlayIcon::FastForward,
        }
    }

    /// Apply one step to `position_ms`. Saturates at zero; the upper bound
    /// is left to the handle's clamp.
    pub fn apply(&self, position_ms: u64, step_ms: u64) -> u64 {
        match self {
            SeekDirection::Rewind => position_ms.saturating_sub(step_ms),
            SeekDirection::FastForward => position_ms.saturating_add(step_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewind_saturates_at_zero() {
        assert_eq!(SeekDirection::Rewind.apply(400, 1000), 0);
        assert_eq!(SeekDirection::Rewind.apply(2500, 1000), 1500);
    }

    #[test]
    fn test_fast_forward_adds_step() {
        assert_eq!(SeekDirection::FastForward.apply(2500, 1000), 3500);
        assert_eq!(SeekDirection::FastForward.apply(u64::MAX, 1000), u64::MAX);
    }

    #[test]
    fn test_direction_icons() {
        assert_eq!(SeekDirection::Rewind.icon(), OverlayIcon::Rewind);
        assert_eq!(SeekDirection::FastForward.icon(), OverlayIcon::FastForward);
        assert!(!OverlayIcon::None.is_visible());
        assert!(OverlayIcon::Pause.is_visible());
    }
}
