use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Tactile half of the video surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    /// Taps toggle playback, holds rewind
    Left,
    /// Taps toggle playback, holds fast-forward
    Right,
}

impl Zone {
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "left" | "l" => Ok(Zone::Left),
            "right" | "r" => Ok(Zone::Right),
            other => anyhow::bail!("Unknown zone: {:?}", other),
        }
    }
}

/// What the touch layer recognised in a zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureKind {
    /// Finger went down; the touch layer does not know yet if it is a tap
    PressStart,
    /// The press lasted long enough to count as a hold
    HoldThresholdReached,
    /// Finger lifted
    PressEnd,
    /// Press released before the hold threshold
    Tap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GestureEvent {
    pub zone: Zone,
    pub kind: GestureKind,
}

impl GestureEvent {
    pub fn new(zone: Zone, kind: GestureKind) -> Self {
        Self { zone, kind }
    }
}

/// Everything the input layer can push into the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    Gesture(GestureEvent),
    /// Progress bar dragged to `target_ms`
    Scrub { target_ms: u64 },
}

impl InputEvent {
    pub fn tap(zone: Zone) -> Self {
        InputEvent::Gesture(GestureEvent::new(zone, GestureKind::Tap))
    }

    pub fn hold(zone: Zone) -> Self {
        InputEvent::Gesture(GestureEvent::new(zone, GestureKind::HoldThresholdReached))
    }

    pub fn release(zone: Zone) -> Self {
        InputEvent::Gesture(GestureEvent::new(zone, GestureKind::PressEnd))
    }

    /// Parse the `event,arg` pair used by gesture scripts
    pub fn parse(event: &str, arg: &str) -> Result<Self> {
        let kind = match event.trim().to_lowercase().as_str() {
            "scrub" => {
                let target_ms = arg
                    .trim()
                    .parse::<u64>()
                    .map_err(|e| anyhow::anyhow!("Invalid scrub target {:?}: {}", arg, e))?;
                return Ok(InputEvent::Scrub { target_ms });
            }
            "tap" => GestureKind::Tap,
            "press_start" | "press" => GestureKind::PressStart,
            "hold" | "hold_start" => GestureKind::HoldThresholdReached,
            "press_end" | "release" | "hold_end" => GestureKind::PressEnd,
            other => anyhow::bail!("Unknown gesture event: {:?}", other),
        };

        Ok(InputEvent::Gesture(GestureEvent::new(Zone::parse(arg)?, kind)))
    }
}
