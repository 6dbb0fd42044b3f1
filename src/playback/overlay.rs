use crate::core::OverlayIcon;
use crate::playback::session::{lock_session, Session, SharedSession};
use std::time::Duration;

/// Self-expiring overlay icon
///
/// Every [`raise`](OverlaySignal::raise) bumps a generation counter. A clear
/// scheduled for an older generation is ignored, so a timer started by an
/// earlier raise can never erase a newer icon.
#[derive(Debug, Clone)]
pub struct OverlaySignal {
    icon: OverlayIcon,
    generation: u64,
    clear_after: Duration,
}

impl OverlaySignal {
    pub fn new(clear_after: Duration) -> Self {
        Self {
            icon: OverlayIcon::None,
            generation: 0,
            clear_after,
        }
    }

    /// Icon currently shown
    pub fn icon(&self) -> OverlayIcon {
        self.icon
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Delay between a raise and its scheduled clear
    pub fn clear_after(&self) -> Duration {
        self.clear_after
    }

    /// Show `icon` and return the generation the matching clear must carry
    pub fn raise(&mut self, icon: OverlayIcon) -> u64 {
        self.icon = icon;
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }

    /// Clear the icon if no raise happened since `generation` was issued.
    /// Returns whether the icon was cleared.
    pub fn scheduled_clear(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            return false;
        }
        self.icon = OverlayIcon::None;
        true
    }

    /// Make every pending clear stale without touching the icon
    pub fn invalidate(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}

/// Raise `icon` on the session overlay and schedule its auto-clear
pub(crate) fn raise_overlay(shared: &SharedSession, session: &mut Session, icon: OverlayIcon) {
    let generation = session.overlay.raise(icon);
    let delay = session.overlay.clear_after();
    let shared = shared.clone();

    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        lock_session(&shared).overlay.scheduled_clear(generation);
    });
}
