use crate::playback::session::{lock_session, Session, SharedSession};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Background loop running a callback on the session at a fixed period
///
/// The active flag is checked under the session lock before every tick,
/// and [`RepeatingTask::stop`] clears it under the same lock, so once
/// `stop` returns the callback can no longer touch the session.
pub(crate) struct RepeatingTask {
    active: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

impl RepeatingTask {
    pub fn spawn<F>(session: SharedSession, first_tick: Instant, period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut(&SharedSession, &mut Session) + Send + 'static,
    {
        let active = Arc::new(AtomicBool::new(true));
        let flag = active.clone();

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(first_tick, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;

                let ticked = {
                    let mut guard = lock_session(&session);
                    let active = flag.load(Ordering::SeqCst);
                    if active {
                        on_tick(&session, &mut *guard);
                    }
                    active
                };
                if !ticked {
                    break;
                }
            }
        });

        Self { active, handle }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Stop the loop. Must not be called while holding the session lock.
    pub fn stop(&self, session: &SharedSession) {
        {
            let _guard = lock_session(session);
            self.active.store(false, Ordering::SeqCst);
        }
        self.handle.abort();
    }
}

impl Drop for RepeatingTask {
    fn drop(&mut self) {
        self.active.store(false, Ordering::SeqCst);
        self.handle.abort();
    }
}

impl std::fmt::Debug for RepeatingTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepeatingTask")
            .field("active", &self.is_active())
            .finish()
    }
}
