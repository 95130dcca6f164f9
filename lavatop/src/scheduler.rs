//! Repeating refresh timer. At most one timer is live at a time.

use std::time::Duration;

use thiserror::Error;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

pub const ALLOWED_INTERVALS_MS: [u64; 6] = [1_000, 2_000, 5_000, 10_000, 30_000, 60_000];
pub const DEFAULT_INTERVAL_MS: u64 = 5_000;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unsupported refresh interval {0}ms (allowed: 1000, 2000, 5000, 10000, 30000, 60000)")]
pub struct UnsupportedInterval(pub u64);

pub fn is_allowed_interval(ms: u64) -> bool {
    ALLOWED_INTERVALS_MS.contains(&ms)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshConfig {
    pub interval_ms: u64,
    pub auto_refresh: bool,
}

impl RefreshConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Next longer allowed interval, saturating at the longest.
    pub fn next_interval(&self) -> u64 {
        ALLOWED_INTERVALS_MS
            .iter()
            .copied()
            .find(|&ms| ms > self.interval_ms)
            .unwrap_or(ALLOWED_INTERVALS_MS[ALLOWED_INTERVALS_MS.len() - 1])
    }

    /// Next shorter allowed interval, saturating at the shortest.
    pub fn prev_interval(&self) -> u64 {
        ALLOWED_INTERVALS_MS
            .iter()
            .rev()
            .copied()
            .find(|&ms| ms < self.interval_ms)
            .unwrap_or(ALLOWED_INTERVALS_MS[0])
    }

    pub fn describe(&self) -> String {
        if self.auto_refresh {
            format!("Auto-refreshes every {} seconds", self.interval_ms / 1000)
        } else {
            "Auto-refresh paused".into()
        }
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_INTERVAL_MS,
            auto_refresh: true,
        }
    }
}

pub struct RefreshScheduler {
    config: RefreshConfig,
    timer: Option<Interval>,
    // bumped every time a new timer is armed
    generation: u64,
}

impl RefreshScheduler {
    /// Created stopped; call [`start`](Self::start) or [`restart`](Self::restart).
    pub fn new(config: RefreshConfig) -> Self {
        Self {
            config,
            timer: None,
            generation: 0,
        }
    }

    pub fn config(&self) -> RefreshConfig {
        self.config
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Arm a fresh timer, replacing any running one. First tick is one
    /// period from now.
    pub fn start(&mut self) {
        let period = self.config.interval();
        let mut timer = interval_at(Instant::now() + period, period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.timer = Some(timer);
        self.generation += 1;
    }

    pub fn stop(&mut self) {
        self.timer = None;
    }

    /// Stop, then start again if auto-refresh is enabled.
    pub fn restart(&mut self) {
        self.stop();
        if self.config.auto_refresh {
            self.start();
        }
    }

    /// Flip auto-refresh and start or stop to match. Returns the new flag.
    pub fn toggle(&mut self) -> bool {
        self.config.auto_refresh = !self.config.auto_refresh;
        if self.config.auto_refresh {
            self.restart();
        } else {
            self.stop();
        }
        self.config.auto_refresh
    }

    pub fn set_interval(&mut self, ms: u64) -> Result<(), UnsupportedInterval> {
        if !is_allowed_interval(ms) {
            return Err(UnsupportedInterval(ms));
        }
        self.config.interval_ms = ms;
        self.restart();
        Ok(())
    }

    /// Resolves on the next tick; never resolves while stopped.
    pub async fn tick(&mut self) {
        match self.timer.as_mut() {
            Some(timer) => {
                timer.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}
