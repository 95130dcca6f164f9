//! Fixed-delay retries before the first connection, then handoff to the
//! regular refresh timer.

use std::time::Duration;

use tokio::time::Instant;

use crate::dashboard::Applied;

/// What the event loop should do after a report was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupStep {
    /// Nothing to do: the report was stale or startup is already over.
    Ignore,
    /// Run another attempt at this instant.
    RetryAt(Instant),
    /// Startup connected or gave up; the scheduler owns polling from now on.
    Handoff,
}

#[derive(Debug, Clone)]
pub struct StartupRetry {
    delay: Duration,
    retry_at: Option<Instant>,
    done: bool,
}

impl StartupRetry {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            retry_at: None,
            done: false,
        }
    }

    /// `initializing` is the connection controller's state after `applied`.
    pub fn on_applied(&mut self, applied: &Applied, initializing: bool) -> StartupStep {
        if self.done || *applied == Applied::Stale {
            return StartupStep::Ignore;
        }
        if initializing {
            let at = Instant::now() + self.delay;
            self.retry_at = Some(at);
            StartupStep::RetryAt(at)
        } else {
            self.done = true;
            self.retry_at = None;
            StartupStep::Handoff
        }
    }

    /// Called when the pending attempt fires.
    pub fn take_due(&mut self) {
        self.retry_at = None;
    }

    pub fn retry_at(&self) -> Option<Instant> {
        self.retry_at
    }

    pub fn is_done(&self) -> bool {
        self.done
    }
}
