use crate::core::SeekDirection;
use crate::playback::overlay::raise_overlay;
use crate::playback::session::{lock_session, Session, SharedSession};
use crate::playback::ticker::RepeatingTask;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Press-and-hold seeking in one direction
///
/// `Idle -> Holding` on press start: one step is applied immediately and a
/// loop repeats it every `repeat` until the press ends. Releasing never
/// seeks by itself.
#[derive(Debug)]
pub struct HoldToSeekController {
    direction: SeekDirection,
    step_ms: u64,
    repeat: Duration,
    task: Option<RepeatingTask>,
}

impl HoldToSeekController {
    pub fn new(direction: SeekDirection, step_ms: u64, repeat: Duration) -> Self {
        Self {
            direction,
            step_ms,
            repeat,
            task: None,
        }
    }

    pub fn direction(&self) -> SeekDirection {
        self.direction
    }

    pub fn is_holding(&self) -> bool {
        self.task.is_some()
    }

    /// Enter `Holding`. Returns false if a hold was already in progress.
    pub(crate) fn on_press_start(&mut self, shared: &SharedSession) -> bool {
        if self.is_holding() {
            return false;
        }

        let direction = self.direction;
        let step_ms = self.step_ms;

        seek_step(shared, &mut lock_session(shared), direction, step_ms);

        let first_tick = Instant::now() + self.repeat;
        self.task = Some(RepeatingTask::spawn(
            shared.clone(),
            first_tick,
            self.repeat,
            move |shared, session| seek_step(shared, session, direction, step_ms),
        ));

        debug!("{:?} hold started", direction);
        true
    }

    /// Back to `Idle`. Returns false if nothing was being held.
    pub(crate) fn on_press_end(&mut self, shared: &SharedSession) -> bool {
        let Some(task) = self.task.take() else {
            return false;
        };

        task.stop(shared);
        debug!("{:?} hold ended", self.direction);
        true
    }
}

/// Move one step from the current engine position and keep the icon up
fn seek_step(shared: &SharedSession, session: &mut Session, direction: SeekDirection, step_ms: u64) {
    if let Some(handle) = session.handle.as_mut() {
        let step = handle
            .position_ms()
            .and_then(|position| handle.seek_to(direction.apply(position, step_ms)));
        match step {
            Ok(applied) => session.progress.position_ms = applied,
            Err(e) => debug!("Skipping {:?} step: {}", direction, e),
        }
    }

    raise_overlay(shared, session, direction.icon());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::OverlayIcon;
    use crate::engine::{EngineCall, MediaSource, MockMediaEngine, MockProbe, PlaybackHandle};
    use crate::playback::overlay::OverlaySignal;
    use std::sync::{Arc, Mutex};

    async fn paused_session(duration_ms: i64, start_ms: u64) -> (SharedSession, MockProbe) {
        let engine = MockMediaEngine::new("test", duration_ms);
        let probe = engine.probe();
        let mut source = MediaSource::new("clip");
        source.looping = false;
        let mut handle = PlaybackHandle::acquire(Box::new(engine), &source)
            .await
            .unwrap();
        handle.seek_to(start_ms).unwrap();

        let mut session = Session::new(OverlaySignal::new(Duration::from_millis(600)));
        session.handle = Some(handle);
        (Arc::new(Mutex::new(session)), probe)
    }

    fn seeks(probe: &MockProbe) -> Vec<u64> {
        probe
            .calls()
            .into_iter()
            .filter_map(|c| match c {
                EngineCall::SeekTo(ms) => Some(ms),
                _ => None,
            })
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_hold_repeats_until_release() {
        let (shared, probe) = paused_session(10_000, 0).await;
        let mut hold = HoldToSeekController::new(
            SeekDirection::FastForward,
            1000,
            Duration::from_millis(300),
        );

        assert!(hold.on_press_start(&shared));
        assert!(hold.is_holding());
        assert_eq!(lock_session(&shared).overlay.icon(), OverlayIcon::FastForward);

        // Steps at 0, 300, 600 and 900
        tokio::time::sleep(Duration::from_millis(1_000)).await;
        assert!(hold.on_press_end(&shared));

        // First entry is the setup seek to 0
        assert_eq!(seeks(&probe), vec![0, 1000, 2000, 3000, 4000]);
        assert_eq!(probe.position_ms(), 4000);

        // No seek after release
        tokio::time::sleep(Duration::from_millis(1_000)).await;
        assert_eq!(probe.seek_count(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rewind_clamps_at_zero() {
        let (shared, probe) = paused_session(10_000, 1_500).await;
        let mut hold = HoldToSeekController::new(SeekDirection::Rewind, 1000, Duration::from_millis(300));

        hold.on_press_start(&shared);
        tokio::time::sleep(Duration::from_millis(700)).await;
        hold.on_press_end(&shared);

        assert_eq!(seeks(&probe), vec![1_500, 500, 0, 0]);
        assert_eq!(lock_session(&shared).progress.position_ms, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fast_forward_clamps_at_duration() {
        let (shared, probe) = paused_session(10_000, 9_200).await;
        let mut hold = HoldToSeekController::new(
            SeekDirection::FastForward,
            1000,
            Duration::from_millis(300),
        );

        hold.on_press_start(&shared);
        tokio::time::sleep(Duration::from_millis(400)).await;
        hold.on_press_end(&shared);

        assert_eq!(seeks(&probe), vec![9_200, 10_000, 10_000]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_duration_clamps_to_zero() {
        let (shared, probe) = paused_session(0, 0).await;
        let mut hold = HoldToSeekController::new(
            SeekDirection::FastForward,
            1000,
            Duration::from_millis(300),
        );

        hold.on_press_start(&shared);
        hold.on_press_end(&shared);
        assert_eq!(seeks(&probe), vec![0, 0]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_press_end_is_idempotent() {
        let (shared, probe) = paused_session(10_000, 0).await;
        let mut hold = HoldToSeekController::new(SeekDirection::Rewind, 1000, Duration::from_millis(300));

        // Releasing while idle does nothing
        assert!(!hold.on_press_end(&shared));
        assert_eq!(probe.seek_count(), 1);

        hold.on_press_start(&shared);
        assert!(hold.on_press_end(&shared));
        assert!(!hold.on_press_end(&shared));
        assert!(!hold.is_holding());
        assert_eq!(probe.seek_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_press_start_is_ignored() {
        let (shared, probe) = paused_session(10_000, 0).await;
        let mut hold = HoldToSeekController::new(
            SeekDirection::FastForward,
            1000,
            Duration::from_millis(300),
        );

        assert!(hold.on_press_start(&shared));
        assert!(!hold.on_press_start(&shared));
        hold.on_press_end(&shared);
        assert_eq!(seeks(&probe), vec![0, 1000]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_read_skips_step_but_keeps_icon() {
        let (shared, probe) = paused_session(10_000, 0).await;
        let mut hold = HoldToSeekController::new(
            SeekDirection::FastForward,
            1000,
            Duration::from_millis(300),
        );

        probe.fail_reads(true);
        hold.on_press_start(&shared);
        assert_eq!(probe.seek_count(), 1);
        assert_eq!(lock_session(&shared).overlay.icon(), OverlayIcon::FastForward);

        probe.fail_reads(false);
        tokio::time::sleep(Duration::from_millis(350)).await;
        hold.on_press_end(&shared);
        assert_eq!(seeks(&probe), vec![0, 1000]);
    }
}
