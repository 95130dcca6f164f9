//! Startup retries and handoff to the refresh timer, on a paused clock.

mod common;

use std::time::Duration;

use chrono::Local;
use lavatop::connection::ConnectionStatus;
use lavatop::dashboard::{CycleReport, DashboardState, ServerSnapshot};
use lavatop::fetch::FetchError;
use lavatop::scheduler::{RefreshConfig, RefreshScheduler};
use lavatop::startup::{StartupRetry, StartupStep};
use tokio::time::Instant;

const DELAY: Duration = Duration::from_millis(2000);

struct Harness {
    state: DashboardState,
    startup: StartupRetry,
    scheduler: RefreshScheduler,
}

impl Harness {
    fn new(max_retries: u32) -> Self {
        Self {
            state: DashboardState::new(max_retries),
            startup: StartupRetry::new(DELAY),
            scheduler: RefreshScheduler::new(RefreshConfig::default()),
        }
    }

    // Same steps as the event loop's report handler.
    fn feed(&mut self, report: CycleReport) -> StartupStep {
        let applied = self.state.apply(report, Local::now());
        let step = self
            .startup
            .on_applied(&applied, self.state.connection.is_initializing());
        if step == StartupStep::Handoff {
            self.scheduler.restart();
        }
        step
    }

    fn fail(&mut self) -> StartupStep {
        let seq = self.state.begin_cycle();
        self.feed(failed(seq))
    }

    fn succeed(&mut self) -> StartupStep {
        let seq = self.state.begin_cycle();
        self.feed(ok(seq))
    }
}

fn failed(seq: u64) -> CycleReport {
    CycleReport {
        seq,
        outcome: Err(FetchError::EmptyResponse { endpoint: "/v4/stats".into() }),
    }
}

fn ok(seq: u64) -> CycleReport {
    CycleReport {
        seq,
        outcome: Ok(ServerSnapshot {
            stats: serde_json::from_str(common::STATS_JSON).unwrap(),
            info: serde_json::from_str(common::INFO_JSON).unwrap(),
            version: Some("v4.0.8".into()),
        }),
    }
}

#[tokio::test(start_paused = true)]
async fn failure_rearms_retry_after_fixed_delay() {
    let mut h = Harness::new(3);

    let before = Instant::now();
    assert_eq!(h.fail(), StartupStep::RetryAt(before + DELAY));
    assert_eq!(h.startup.retry_at(), Some(before + DELAY));
    assert!(!h.scheduler.is_running());

    // Next attempt fires after the delay and is re-armed from then on.
    tokio::time::sleep_until(before + DELAY).await;
    h.startup.take_due();
    assert_eq!(h.startup.retry_at(), None);
    let at = Instant::now();
    assert_eq!(h.fail(), StartupStep::RetryAt(at + DELAY));
    assert!(!h.startup.is_done());
    assert_eq!(h.state.connection.retry_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn last_allowed_failure_hands_off_to_scheduler() {
    let mut h = Harness::new(3);
    assert!(matches!(h.fail(), StartupStep::RetryAt(_)));
    assert!(matches!(h.fail(), StartupStep::RetryAt(_)));

    assert_eq!(h.fail(), StartupStep::Handoff);
    assert!(h.startup.is_done());
    assert_eq!(h.startup.retry_at(), None);
    assert!(h.scheduler.is_running());
    assert_eq!(h.state.connection.status(), ConnectionStatus::Offline);
    assert_eq!(h.state.connection.retry_count(), 3);

    // Later failures belong to the timer and never re-arm the startup retry.
    assert_eq!(h.fail(), StartupStep::Ignore);
    assert_eq!(h.startup.retry_at(), None);
    assert_eq!(h.scheduler.generation(), 1);
}

#[tokio::test(start_paused = true)]
async fn success_mid_startup_clears_retry_and_starts_scheduler() {
    let mut h = Harness::new(5);
    assert!(matches!(h.fail(), StartupStep::RetryAt(_)));
    assert!(h.startup.retry_at().is_some());

    assert_eq!(h.succeed(), StartupStep::Handoff);
    assert_eq!(h.startup.retry_at(), None);
    assert!(h.scheduler.is_running());
    assert_eq!(h.state.connection.status(), ConnectionStatus::Online);
    assert_eq!(h.state.connection.retry_count(), 0);

    // The first timer tick lands one period after the handoff.
    let start = Instant::now();
    h.scheduler.tick().await;
    assert_eq!(Instant::now() - start, Duration::from_millis(5000));
}

#[tokio::test(start_paused = true)]
async fn stale_report_does_not_rearm_retry() {
    let mut h = Harness::new(5);
    let older = h.state.begin_cycle();
    let newer = h.state.begin_cycle();

    assert!(matches!(h.feed(failed(newer)), StartupStep::RetryAt(_)));
    let armed = h.startup.retry_at();

    tokio::time::advance(Duration::from_millis(500)).await;
    assert_eq!(h.feed(failed(older)), StartupStep::Ignore);
    assert_eq!(h.startup.retry_at(), armed);
    assert_eq!(h.state.connection.retry_count(), 1);
}
