use async_trait::async_trait;
use crate::engine::media_engine::{EngineError, EngineResult, MediaEngine, MediaSource};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::time::Instant;

/// Command recorded by the mock engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineCall {
    Open,
    Play,
    Pause,
    SeekTo(u64),
    Release,
}

struct MockState {
    open: bool,
    looping: bool,
    playing: bool,
    duration_ms: i64,
    /// Position at the moment of the last play/pause/seek
    anchor_ms: u64,
    /// Clock reading matching `anchor_ms` while playing
    anchor_time: Option<Instant>,
    calls: Vec<EngineCall>,
    fail_reads: bool,
    fail_open: bool,
}

impl MockState {
    fn raw_position(&self) -> u64 {
        match self.anchor_time {
            Some(started) if self.playing => {
                self.anchor_ms + started.elapsed().as_millis() as u64
            }
            _ => self.anchor_ms,
        }
    }

    fn position(&self) -> u64 {
        let raw = self.raw_position();
        if self.duration_ms <= 0 {
            return raw;
        }

        let duration = self.duration_ms as u64;
        if self.looping {
            raw % duration
        } else {
            raw.min(duration)
        }
    }

    fn reached_end(&self) -> bool {
        !self.looping && self.duration_ms > 0 && self.raw_position() >= self.duration_ms as u64
    }

    fn check_readable(&self) -> EngineResult<()> {
        if !self.open {
            return Err(EngineError::NotOpen);
        }
        if self.fail_reads {
            return Err(EngineError::Unavailable("mock read failure".to_string()));
        }
        Ok(())
    }

    fn reanchor(&mut self) {
        self.anchor_ms = self.position();
        self.anchor_time = self.playing.then(Instant::now);
    }
}

fn lock(state: &Mutex<MockState>) -> MutexGuard<'_, MockState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Mock media engine for testing without a real decoder
///
/// Position advances with the Tokio clock while playing, so tests running
/// with a paused clock see deterministic positions. Every command is
/// recorded and can be inspected through a [`MockProbe`].
pub struct MockMediaEngine {
    name: String,
    state: Arc<Mutex<MockState>>,
}

impl MockMediaEngine {
    /// Create a mock engine whose media lasts `duration_ms`.
    /// Zero or negative means "duration unknown".
    pub fn new(name: &str, duration_ms: i64) -> Self {
        Self {
            name: name.to_string(),
            state: Arc::new(Mutex::new(MockState {
                open: false,
                looping: false,
                playing: false,
                duration_ms,
                anchor_ms: 0,
                anchor_time: None,
                calls: Vec::new(),
                fail_reads: false,
                fail_open: false,
            })),
        }
    }

    /// Get a probe that stays valid after the engine is handed off
    pub fn probe(&self) -> MockProbe {
        MockProbe {
            state: self.state.clone(),
        }
    }
}

/// Inspection and fault-injection side of a [`MockMediaEngine`]
#[derive(Clone)]
pub struct MockProbe {
    state: Arc<Mutex<MockState>>,
}

impl MockProbe {
    /// Every command received so far, in order
    pub fn calls(&self) -> Vec<EngineCall> {
        lock(&self.state).calls.clone()
    }

    /// Number of recorded seeks
    pub fn seek_count(&self) -> usize {
        lock(&self.state)
            .calls
            .iter()
            .filter(|c| matches!(c, EngineCall::SeekTo(_)))
            .count()
    }

    /// Make position/duration/playing reads fail until turned off
    pub fn fail_reads(&self, enabled: bool) {
        lock(&self.state).fail_reads = enabled;
    }

    /// Make the next `open` fail
    pub fn fail_open(&self, enabled: bool) {
        lock(&self.state).fail_open = enabled;
    }

    /// Change the reported duration, e.g. once "loading" finishes
    pub fn set_duration(&self, duration_ms: i64) {
        let mut state = lock(&self.state);
        state.reanchor();
        state.duration_ms = duration_ms;
    }

    /// Position as the engine currently sees it
    pub fn position_ms(&self) -> u64 {
        lock(&self.state).position()
    }

    pub fn is_playing(&self) -> bool {
        let state = lock(&self.state);
        state.playing && !state.reached_end()
    }

    pub fn is_released(&self) -> bool {
        lock(&self.state).calls.contains(&EngineCall::Release)
    }
}

#[async_trait]
impl MediaEngine for MockMediaEngine {
    fn name(&self) -> &str {
        &self.name
    }

    async fn open(&mut self, source: &MediaSource) -> EngineResult<()> {
        let mut state = lock(&self.state);
        state.calls.push(EngineCall::Open);
        if state.fail_open {
            return Err(EngineError::Backend(format!("cannot open {}", source.uri)));
        }

        state.open = true;
        state.looping = source.looping;
        state.playing = false;
        state.anchor_ms = 0;
        state.anchor_time = None;
        Ok(())
    }

    fn release(&mut self) {
        let mut state = lock(&self.state);
        state.calls.push(EngineCall::Release);
        state.reanchor();
        state.open = false;
        state.playing = false;
        state.anchor_time = None;
    }

    fn play(&mut self) {
        let mut state = lock(&self.state);
        state.calls.push(EngineCall::Play);
        if state.reached_end() {
            // Replaying a finished clip starts over
            state.anchor_ms = 0;
        } else {
            state.reanchor();
        }
        state.playing = true;
        state.anchor_time = Some(Instant::now());
    }

    fn pause(&mut self) {
        let mut state = lock(&self.state);
        state.calls.push(EngineCall::Pause);
        state.reanchor();
        state.playing = false;
        state.anchor_time = None;
    }

    fn seek_to(&mut self, position_ms: u64) {
        let mut state = lock(&self.state);
        state.calls.push(EngineCall::SeekTo(position_ms));
        state.anchor_ms = position_ms;
        state.anchor_time = state.playing.then(Instant::now);
    }

    fn position_ms(&self) -> EngineResult<u64> {
        let state = lock(&self.state);
        state.check_readable()?;
        Ok(state.position())
    }

    fn duration_ms(&self) -> EngineResult<i64> {
        let state = lock(&self.state);
        state.check_readable()?;
        Ok(state.duration_ms)
    }

    fn is_playing(&self) -> EngineResult<bool> {
        let state = lock(&self.state);
        state.check_readable()?;
        Ok(state.playing && !state.reached_end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_mock_engine_open_release() {
        let mut engine = MockMediaEngine::new("test", 10_000);
        let probe = engine.probe();
        assert!(matches!(engine.position_ms(), Err(EngineError::NotOpen)));

        engine.open(&MediaSource::new("clip")).await.unwrap();
        assert_eq!(engine.position_ms().unwrap(), 0);

        engine.release();
        assert!(probe.is_released());
        assert!(matches!(engine.duration_ms(), Err(EngineError::NotOpen)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_mock_engine_advances_while_playing() {
        let mut engine = MockMediaEngine::new("test", 10_000);
        engine.open(&MediaSource::new("clip")).await.unwrap();

        engine.play();
        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(engine.position_ms().unwrap(), 1500);

        engine.pause();
        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(engine.position_ms().unwrap(), 1500);
        assert!(!engine.is_playing().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_mock_engine_looping_wraps() {
        let mut engine = MockMediaEngine::new("test", 1_000);
        let mut source = MediaSource::new("clip");
        source.looping = true;
        engine.open(&source).await.unwrap();

        engine.seek_to(800);
        engine.play();
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(engine.position_ms().unwrap(), 300);
        assert!(engine.is_playing().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_mock_engine_stops_at_end_without_looping() {
        let mut engine = MockMediaEngine::new("test", 1_000);
        let mut source = MediaSource::new("clip");
        source.looping = false;
        engine.open(&source).await.unwrap();

        engine.play();
        tokio::time::sleep(Duration::from_millis(1_500)).await;
        assert_eq!(engine.position_ms().unwrap(), 1_000);
        assert!(!engine.is_playing().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_mock_engine_read_failures() {
        let mut engine = MockMediaEngine::new("test", 10_000);
        let probe = engine.probe();
        engine.open(&MediaSource::new("clip")).await.unwrap();

        probe.fail_reads(true);
        assert!(matches!(engine.position_ms(), Err(EngineError::Unavailable(_))));

        probe.fail_reads(false);
        assert!(engine.position_ms().is_ok());
    }
}
