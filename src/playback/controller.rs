use crate::core::{OverlayIcon, RenderSnapshot, SeekDirection};
use crate::engine::{EngineError, MediaEngine, MediaSource, PlaybackHandle};
use crate::input::{GestureKind, InputEvent, Zone};
use crate::playback::hold_seek::HoldToSeekController;
use crate::playback::overlay::{raise_overlay, OverlaySignal};
use crate::playback::progress::ProgressTracker;
use crate::playback::session::{lock_session, Session, SharedSession};
use crate::playback::PlaybackConfig;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::{debug, info};

/// Errors returned by [`PlaybackInteractionController::mount`]
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("controller is already mounted")]
    AlreadyMounted,

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Playback controller for one mounted video view
///
/// Owns the media handle, the progress poll, both hold-to-seek loops and
/// the overlay icon. Gesture handlers and timer callbacks all go through one
/// session lock. Must be used from inside a Tokio runtime.
#[derive(Debug)]
pub struct PlaybackInteractionController {
    config: PlaybackConfig,
    session: SharedSession,
    tracker: ProgressTracker,
    rewind: HoldToSeekController,
    fast_forward: HoldToSeekController,
}

impl PlaybackInteractionController {
    pub fn new(config: PlaybackConfig) -> Self {
        let overlay = OverlaySignal::new(config.overlay_clear());

        Self {
            session: Arc::new(Mutex::new(Session::new(overlay))),
            tracker: ProgressTracker::new(config.poll_interval()),
            rewind: HoldToSeekController::new(
                SeekDirection::Rewind,
                config.seek_step_ms,
                config.hold_repeat(),
            ),
            fast_forward: HoldToSeekController::new(
                SeekDirection::FastForward,
                config.seek_step_ms,
                config.hold_repeat(),
            ),
            config,
        }
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    pub fn is_mounted(&self) -> bool {
        lock_session(&self.session).handle.is_some()
    }

    /// Whether a hold in `direction` is in progress
    pub fn is_holding(&self, direction: SeekDirection) -> bool {
        match direction {
            SeekDirection::Rewind => self.rewind.is_holding(),
            SeekDirection::FastForward => self.fast_forward.is_holding(),
        }
    }

    /// Open `engine` on `source` and start polling it
    pub async fn mount(
        &mut self,
        engine: Box<dyn MediaEngine>,
        source: MediaSource,
    ) -> Result<(), ControllerError> {
        if self.is_mounted() {
            return Err(ControllerError::AlreadyMounted);
        }

        let handle = PlaybackHandle::acquire(engine, &source).await?;
        info!("Mounted {} ({})", handle.name(), source.uri);

        {
            let mut session = lock_session(&self.session);
            session.handle = Some(handle);
        }
        self.tracker.start(&self.session);

        Ok(())
    }

    /// Stop every loop, then release the engine. Does nothing when not mounted.
    pub fn unmount(&mut self) {
        self.tracker.stop(&self.session);
        self.rewind.on_press_end(&self.session);
        self.fast_forward.on_press_end(&self.session);

        let handle = {
            let mut session = lock_session(&self.session);
            session.overlay.invalidate();
            session.handle.take()
        };

        if let Some(handle) = handle {
            let name = handle.name().to_string();
            handle.release();
            info!("Unmounted {}", name);
        }
    }

    pub fn on_left_zone_tap(&mut self) {
        self.toggle_playback();
    }

    pub fn on_right_zone_tap(&mut self) {
        self.toggle_playback();
    }

    pub fn on_left_zone_hold_start(&mut self) {
        if !self.is_mounted() {
            debug!("Ignoring rewind hold: not mounted");
            return;
        }
        self.rewind.on_press_start(&self.session);
    }

    pub fn on_left_zone_hold_end(&mut self) {
        self.rewind.on_press_end(&self.session);
    }

    pub fn on_right_zone_hold_start(&mut self) {
        if !self.is_mounted() {
            debug!("Ignoring fast-forward hold: not mounted");
            return;
        }
        self.fast_forward.on_press_start(&self.session);
    }

    pub fn on_right_zone_hold_end(&mut self) {
        self.fast_forward.on_press_end(&self.session);
    }

    /// Seek to a position picked on the progress bar.
    ///
    /// The displayed position jumps right away instead of waiting for the
    /// next poll.
    pub fn on_scrub(&mut self, target_ms: u64) {
        let mut guard = lock_session(&self.session);
        let session = &mut *guard;

        let Some(handle) = session.handle.as_mut() else {
            debug!("Ignoring scrub: not mounted");
            return;
        };

        match handle.seek_to(target_ms) {
            Ok(applied) => session.progress.position_ms = applied,
            Err(e) => debug!("Skipping scrub to {} ms: {}", target_ms, e),
        }
    }

    /// Latest progress and overlay icon
    pub fn snapshot(&self) -> RenderSnapshot {
        lock_session(&self.session).render()
    }

    /// Route an input-layer event.
    ///
    /// Taps toggle playback, reaching the hold threshold starts seeking and
    /// lifting the finger ends it. A bare press start does nothing: the touch
    /// layer has not decided yet whether it is a tap.
    pub fn dispatch(&mut self, event: InputEvent) {
        match event {
            InputEvent::Scrub { target_ms } => self.on_scrub(target_ms),
            InputEvent::Gesture(gesture) => match (gesture.zone, gesture.kind) {
                (_, GestureKind::PressStart) => {}
                (Zone::Left, GestureKind::Tap) => self.on_left_zone_tap(),
                (Zone::Right, GestureKind::Tap) => self.on_right_zone_tap(),
                (Zone::Left, GestureKind::HoldThresholdReached) => self.on_left_zone_hold_start(),
                (Zone::Right, GestureKind::HoldThresholdReached) => self.on_right_zone_hold_start(),
                (Zone::Left, GestureKind::PressEnd) => self.on_left_zone_hold_end(),
                (Zone::Right, GestureKind::PressEnd) => self.on_right_zone_hold_end(),
            },
        }
    }

    fn toggle_playback(&mut self) {
        let mut guard = lock_session(&self.session);
        let session = &mut *guard;

        let Some(handle) = session.handle.as_mut() else {
            debug!("Ignoring tap: not mounted");
            return;
        };

        let was_playing = handle.is_playing().unwrap_or(session.progress.is_playing);
        let icon = if was_playing {
            handle.pause();
            OverlayIcon::Pause
        } else {
            handle.play();
            OverlayIcon::Play
        };

        session.progress.is_playing = !was_playing;
        raise_overlay(&self.session, session, icon);
    }
}

impl Drop for PlaybackInteractionController {
    fn drop(&mut self) {
        self.unmount();
    }
}
