use async_trait::async_trait;
use thiserror::Error;

/// Result type for media engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors reported by a media engine
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine cannot answer right now (buffering, mid-prepare, ...)
    #[error("engine temporarily unavailable: {0}")]
    Unavailable(String),

    /// The engine has not been opened, or was already released
    #[error("engine is not open")]
    NotOpen,

    /// Backend-specific failure
    #[error("engine backend error: {0}")]
    Backend(String),
}

/// What to play and how
#[derive(Debug, Clone)]
pub struct MediaSource {
    /// Location of the clip, opaque to the controller
    pub uri: String,
    /// Restart from the beginning when the end is reached
    pub looping: bool,
    /// Start playing as soon as the engine is ready
    pub autoplay: bool,
}

impl MediaSource {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            looping: true,
            autoplay: false,
        }
    }
}

/// Trait for media playback engines
///
/// The controller treats the engine as an opaque capability:
/// - decoding and rendering happen behind this trait
/// - `open` may perform I/O and is therefore async
/// - everything else is a cheap query or command
#[async_trait]
pub trait MediaEngine: Send {
    /// Human readable identifier, used in logs
    fn name(&self) -> &str;

    /// Prepare `source` for playback
    async fn open(&mut self, source: &MediaSource) -> EngineResult<()>;

    /// Free every resource held by the engine
    fn release(&mut self);

    /// Start or resume playback
    fn play(&mut self);

    /// Pause playback
    fn pause(&mut self);

    /// Jump to `position_ms`. Callers clamp the value beforehand.
    fn seek_to(&mut self, position_ms: u64);

    /// Current playback position
    fn position_ms(&self) -> EngineResult<u64>;

    /// Media duration; zero or negative when not yet known
    fn duration_ms(&self) -> EngineResult<i64>;

    /// Whether the engine is playing right now
    fn is_playing(&self) -> EngineResult<bool>;
}
