use crate::core::ProgressSnapshot;
use crate::engine::media_engine::{EngineResult, MediaEngine, MediaSource};
use tracing::{debug, info};

/// Exclusive owner of an opened media engine
///
/// The engine is released exactly once: either explicitly through
/// [`PlaybackHandle::release`] or when the handle is dropped.
pub struct PlaybackHandle {
    engine: Box<dyn MediaEngine>,
    released: bool,
}

impl PlaybackHandle {
    /// Open `engine` on `source` and take ownership of it.
    ///
    /// If opening fails the engine is released before the error is returned.
    pub async fn acquire(
        engine: Box<dyn MediaEngine>,
        source: &MediaSource,
    ) -> EngineResult<Self> {
        let mut handle = Self {
            engine,
            released: false,
        };

        info!("Opening {} on {}", handle.engine.name(), source.uri);
        handle.engine.open(source).await?;

        if source.autoplay {
            handle.engine.play();
        }

        Ok(handle)
    }

    /// Name of the underlying engine
    pub fn name(&self) -> &str {
        self.engine.name()
    }

    pub fn play(&mut self) {
        self.engine.play();
    }

    pub fn pause(&mut self) {
        self.engine.pause();
    }

    /// Seek to `target_ms` clamped to `[0, duration]` and return the
    /// position actually requested from the engine.
    ///
    /// An unknown duration clamps every target to 0. If the duration cannot
    /// be read, nothing is sent to the engine.
    pub fn seek_to(&mut self, target_ms: u64) -> EngineResult<u64> {
        let upper = self.engine.duration_ms()?.max(0) as u64;
        let clamped = target_ms.min(upper);
        self.engine.seek_to(clamped);
        Ok(clamped)
    }

    pub fn position_ms(&self) -> EngineResult<u64> {
        self.engine.position_ms()
    }

    pub fn is_playing(&self) -> EngineResult<bool> {
        self.engine.is_playing()
    }

    /// Read position, duration and playing state in one go
    pub fn sample(&self) -> EngineResult<ProgressSnapshot> {
        let position_ms = self.engine.position_ms()?;
        let duration_ms = self.engine.duration_ms()?;
        let is_playing = self.engine.is_playing()?;
        Ok(ProgressSnapshot::from_raw(position_ms, duration_ms, is_playing))
    }

    /// Release the engine now
    pub fn release(mut self) {
        self.release_engine();
    }

    fn release_engine(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.engine.release();
        debug!("Released {}", self.engine.name());
    }
}

impl Drop for PlaybackHandle {
    fn drop(&mut self) {
        self.release_engine();
    }
}

impl std::fmt::Debug for PlaybackHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackHandle")
            .field("engine", &self.engine.name())
            .field("released", &self.released)
            .finish()
    }
}
