use crate::core::{ProgressSnapshot, RenderSnapshot};
use crate::engine::PlaybackHandle;
use crate::playback::overlay::OverlaySignal;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Mutable state of one mounted video view
///
/// Every timer callback and gesture handler works on this under a single
/// lock, so a seek and the overlay raise that goes with it are observed
/// together by the progress poll.
#[derive(Debug)]
pub(crate) struct Session {
    pub handle: Option<PlaybackHandle>,
    pub progress: ProgressSnapshot,
    pub overlay: OverlaySignal,
}

pub(crate) type SharedSession = Arc<Mutex<Session>>;

impl Session {
    pub fn new(overlay: OverlaySignal) -> Self {
        Self {
            handle: None,
            progress: ProgressSnapshot::default(),
            overlay,
        }
    }

    pub fn render(&self) -> RenderSnapshot {
        RenderSnapshot {
            progress: self.progress,
            overlay: self.overlay.icon(),
        }
    }
}

pub(crate) fn lock_session(session: &Mutex<Session>) -> MutexGuard<'_, Session> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}
