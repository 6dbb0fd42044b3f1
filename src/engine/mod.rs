pub mod media_engine;
pub mod handle;
pub mod mock;

pub use media_engine::{EngineError, EngineResult, MediaEngine, MediaSource};
pub use handle::PlaybackHandle;
pub use mock::{EngineCall, MockMediaEngine, MockProbe};
