//! Repeating refresh trigger with explicit start/stop/reconfigure.
//!
//! At most one timer exists at a time: arming always drops the previous one
//! first, so a stale timer can never fire.

use std::future;
use std::time::Duration;

use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::debug;

pub const MIN_INTERVAL: Duration = Duration::from_millis(250);

/// How many timers were armed and cancelled over the ticker's life.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimerStats {
    pub armed: u64,
    pub cancelled: u64,
}

#[derive(Debug)]
pub struct Ticker {
    interval: Duration,
    timer: Option<Interval>,
    stats: TimerStats,
}

impl Ticker {
    /// A stopped ticker remembering `interval` for the next `start`.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(MIN_INTERVAL),
            timer: None,
            stats: TimerStats::default(),
        }
    }

    /// Arm a repeating trigger; the first tick comes one full interval from now.
    pub fn start(&mut self, interval: Duration) {
        self.cancel();
        self.interval = interval.max(MIN_INTERVAL);
        let mut timer = interval_at(Instant::now() + self.interval, self.interval);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.timer = Some(timer);
        self.stats.armed += 1;
        debug!(interval_ms = self.interval.as_millis() as u64, "refresh timer armed");
    }

    /// Replace the cadence. Takes effect from the next tick; no extra tick is forced.
    pub fn reconfigure(&mut self, interval: Duration) {
        self.start(interval);
    }

    pub fn stop(&mut self) {
        self.cancel();
    }

    fn cancel(&mut self) {
        if self.timer.take().is_some() {
            self.stats.cancelled += 1;
            debug!("refresh timer cancelled");
        }
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn stats(&self) -> TimerStats {
        self.stats
    }

    /// Resolves on the next tick. Never resolves while stopped.
    pub async fn tick(&mut self) {
        match self.timer.as_mut() {
            Some(t) => {
                t.tick().await;
            }
            None => future::pending::<()>().await,
        }
    }
}
