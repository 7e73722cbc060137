//! Repeating refresh schedule.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Handle to a background task that fires every `period`.
///
/// The first tick fires one full period after spawning. The task is aborted
/// when the handle is cancelled or dropped.
#[derive(Debug)]
pub struct RefreshTimer {
    period: Duration,
    handle: JoinHandle<()>,
}

impl RefreshTimer {
    /// Spawn the schedule on the current tokio runtime.
    ///
    /// `on_tick` runs on every tick; returning `false` ends the schedule.
    pub fn spawn<F>(period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() -> bool + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                if !on_tick() {
                    tracing::debug!("Refresh timer receiver gone, stopping");
                    break;
                }
            }
        });

        Self { period, handle }
    }

    /// The tick period.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Whether the background task has ended.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Stop the schedule. Equivalent to dropping the handle.
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for RefreshTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
