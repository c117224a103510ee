//! Cancellable repeating tick with a replaceable period.

use std::time::Duration;

use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

/// Drives the game tick.
///
/// While active, [`TickScheduler::tick`] resolves once per period, the first
/// time one full period after [`TickScheduler::start`]. Changing the period
/// drops the running interval and creates a fresh one, so a tick never
/// straddles two periods. While stopped, `tick` never resolves.
pub struct TickScheduler {
    timer: Option<Interval>,
    period: Duration,
}

impl TickScheduler {
    pub fn new(period: Duration) -> Self {
        Self {
            timer: None,
            period,
        }
    }

    /// Begin ticking at `period`, replacing any running timer
    pub fn start(&mut self, period: Duration) {
        self.period = period;
        let mut timer = interval_at(Instant::now() + period, period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.timer = Some(timer);
    }

    /// Cancel the running timer and restart it at `period`.
    /// When stopped only the stored period changes.
    pub fn reschedule(&mut self, period: Duration) {
        if self.is_active() {
            self.start(period);
        } else {
            self.period = period;
        }
    }

    pub fn stop(&mut self) {
        self.timer = None;
    }

    pub fn is_active(&self) -> bool {
        self.timer.is_some()
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Wait for the next tick. Pends forever while stopped, which makes it
    /// safe to use as a `tokio::select!` branch.
    pub async fn tick(&mut self) {
        match self.timer.as_mut() {
            Some(timer) => {
                timer.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}
