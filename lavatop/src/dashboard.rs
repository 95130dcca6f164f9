//! One poll cycle and the state it updates.
//!
//! [`run_cycle`] does the network work and can run concurrently with other
//! cycles. [`DashboardState::apply`] folds finished cycles back in one at a
//! time, dropping any cycle that finished after a newer one was applied.

use chrono::{DateTime, Local};
use tracing::{debug, error, info, warn};

use crate::connection::{ConnectionController, Transition};
use crate::events::{Banner, EventLog, LogLevel};
use crate::fetch::{FetchError, Fetcher};
use crate::format::format_clock;
use crate::history::{MetricSample, MetricsHistory};
use crate::summary::{InfoSummary, StatsSummary};
use crate::types::{Info, Stats};

/// Everything fetched by one successful cycle.
#[derive(Debug, Clone)]
pub struct ServerSnapshot {
    pub stats: Stats,
    pub info: Info,
    /// `None` when the optional version endpoint failed.
    pub version: Option<String>,
}

#[derive(Debug)]
pub struct CycleReport {
    pub seq: u64,
    pub outcome: Result<ServerSnapshot, FetchError>,
}

/// Stats and info are fetched together and both must succeed; the cycle
/// resolves only once both have settled, reporting the stats error first.
/// Version is asked for afterwards; its failure is logged and ignored.
pub async fn run_cycle(fetcher: &Fetcher, seq: u64) -> CycleReport {
    let (stats, info) = tokio::join!(fetcher.stats(), fetcher.info());
    let outcome = match stats.and_then(|stats| info.map(|info| (stats, info))) {
        Ok((stats, info)) => {
            let version = match fetcher.version().await {
                Ok(v) => Some(v),
                Err(e) => {
                    warn!(seq, "version endpoint failed: {e}");
                    None
                }
            };
            Ok(ServerSnapshot {
                stats,
                info,
                version,
            })
        }
        Err(e) => Err(e),
    };
    CycleReport { seq, outcome }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    Fresh(Transition),
    /// A newer cycle had already been applied; nothing changed.
    Stale,
}

pub struct DashboardState {
    pub connection: ConnectionController,
    pub history: MetricsHistory,
    pub log: EventLog,
    banner: Option<Banner>,
    snapshot: Option<ServerSnapshot>,
    stats_summary: Option<StatsSummary>,
    info_summary: Option<InfoSummary>,
    version: Option<String>,
    next_seq: u64,
    last_applied_seq: u64,
}

impl DashboardState {
    pub fn new(max_retries: u32) -> Self {
        Self {
            connection: ConnectionController::new(max_retries),
            history: MetricsHistory::default(),
            log: EventLog::default(),
            banner: None,
            snapshot: None,
            stats_summary: None,
            info_summary: None,
            version: None,
            next_seq: 1,
            last_applied_seq: 0,
        }
    }

    /// Sequence number for a cycle about to be spawned.
    pub fn begin_cycle(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    pub fn apply(&mut self, report: CycleReport, now: DateTime<Local>) -> Applied {
        if report.seq <= self.last_applied_seq {
            warn!(
                seq = report.seq,
                newest = self.last_applied_seq,
                "discarding stale cycle"
            );
            return Applied::Stale;
        }
        self.last_applied_seq = report.seq;

        let transition = match report.outcome {
            Ok(snapshot) => {
                self.history
                    .push(MetricSample::from_stats(&snapshot.stats, format_clock(&now)));
                self.stats_summary = Some(StatsSummary::from_stats(&snapshot.stats));
                self.info_summary = Some(InfoSummary::from_info(&snapshot.info));
                // Keep the last known version when only that endpoint failed.
                if let Some(v) = &snapshot.version {
                    self.version = Some(v.clone());
                }
                self.snapshot = Some(snapshot);
                self.connection.on_success(now)
            }
            Err(e) => self.connection.on_failure(&e),
        };

        match &transition {
            Transition::Connected => info!(seq = report.seq, "connected"),
            Transition::Refreshed => debug!(seq = report.seq, "refreshed"),
            Transition::Retrying { attempt, max } => {
                warn!(seq = report.seq, attempt, max, "connection attempt failed")
            }
            Transition::GaveUp { attempts, reason } => {
                error!(attempts, "giving up on initial connection: {reason}")
            }
            Transition::Lost { reason } => error!("connection lost: {reason}"),
            Transition::StillOffline { reason } => debug!("still offline: {reason}"),
        }

        self.banner = transition.banner();
        if let Some((level, message)) = transition.log_entry() {
            self.log.push(level, message, now);
        }
        Applied::Fresh(transition)
    }

    /// Add a user-facing event (config changes, theme, etc.).
    pub fn record(&mut self, level: LogLevel, message: impl Into<String>, now: DateTime<Local>) {
        let message = message.into();
        info!("{message}");
        self.log.push(level, message, now);
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    pub fn snapshot(&self) -> Option<&ServerSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn stats_summary(&self) -> Option<&StatsSummary> {
        self.stats_summary.as_ref()
    }

    pub fn info_summary(&self) -> Option<&InfoSummary> {
        self.info_summary.as_ref()
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn last_applied_seq(&self) -> u64 {
        self.last_applied_seq
    }
}
