use crate::playback::session::{lock_session, Session, SharedSession};
use crate::playback::ticker::RepeatingTask;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Periodically samples the engine and republishes the progress snapshot
#[derive(Debug)]
pub struct ProgressTracker {
    interval: Duration,
    task: Option<RepeatingTask>,
}

impl ProgressTracker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            task: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    /// Sample once right away, then every `interval`
    pub(crate) fn start(&mut self, shared: &SharedSession) {
        self.stop(shared);

        sample_into(&mut lock_session(shared));

        let first_tick = Instant::now() + self.interval;
        self.task = Some(RepeatingTask::spawn(
            shared.clone(),
            first_tick,
            self.interval,
            |_, session| sample_into(session),
        ));
    }

    /// Cancel the polling loop. Calling it again does nothing.
    pub(crate) fn stop(&mut self, shared: &SharedSession) {
        if let Some(task) = self.task.take() {
            task.stop(shared);
        }
    }
}

/// Refresh the published snapshot from the engine.
/// A failed read leaves the previous snapshot in place.
pub(crate) fn sample_into(session: &mut Session) {
    let Some(handle) = session.handle.as_ref() else {
        return;
    };

    match handle.sample() {
        Ok(snapshot) => session.progress = snapshot,
        Err(e) => debug!("Skipping progress tick: {}", e),
    }
}
