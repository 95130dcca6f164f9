//! Connection status state machine driven by poll outcomes.
//!
//! Startup gets a bounded number of attempts. Once the dashboard has either
//! connected or given up, every scheduled poll acts as an uncapped retry and
//! the counter stays untouched.

use std::fmt::Display;

use chrono::{DateTime, Local};

use crate::events::{Banner, LogLevel};

pub const DEFAULT_MAX_RETRIES: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connecting,
    Online,
    Offline,
}

impl ConnectionStatus {
    pub fn label(self) -> &'static str {
        match self {
            ConnectionStatus::Connecting => "Connecting...",
            ConnectionStatus::Online => "Online",
            ConnectionStatus::Offline => "Offline",
        }
    }
}

/// What a single poll outcome did to the connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Edge into `Online` from `Connecting` or `Offline`.
    Connected,
    /// Success while already online.
    Refreshed,
    Retrying { attempt: u32, max: u32 },
    GaveUp { attempts: u32, reason: String },
    /// Edge from `Online` into `Offline`.
    Lost { reason: String },
    StillOffline { reason: String },
}

impl Transition {
    /// Banner to show after this transition; `None` clears it.
    pub fn banner(&self) -> Option<Banner> {
        match self {
            Transition::Connected | Transition::Refreshed => None,
            Transition::Retrying { attempt, max } => Some(Banner::warning(format!(
                "Connecting to Lavalink... (Attempt {attempt}/{max})"
            ))),
            Transition::GaveUp { attempts, reason } => Some(Banner::error(format!(
                "Unable to connect after {attempts} attempts: {reason}"
            ))),
            Transition::Lost { reason } | Transition::StillOffline { reason } => {
                Some(Banner::error(format!("Connection lost: {reason}")))
            }
        }
    }

    /// Event log line, only for edges worth recording.
    pub fn log_entry(&self) -> Option<(LogLevel, String)> {
        match self {
            Transition::Connected => {
                Some((LogLevel::Success, "Connected to Lavalink server".into()))
            }
            Transition::Lost { reason } => {
                Some((LogLevel::Error, format!("Connection lost: {reason}")))
            }
            Transition::GaveUp { attempts, .. } => Some((
                LogLevel::Error,
                format!("Failed to connect after {attempts} attempts"),
            )),
            Transition::Refreshed
            | Transition::Retrying { .. }
            | Transition::StillOffline { .. } => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConnectionController {
    status: ConnectionStatus,
    retry_count: u32,
    max_retries: u32,
    initializing: bool,
    last_success_at: Option<DateTime<Local>>,
}

impl ConnectionController {
    pub fn new(max_retries: u32) -> Self {
        Self {
            status: ConnectionStatus::Connecting,
            retry_count: 0,
            max_retries,
            initializing: true,
            last_success_at: None,
        }
    }

    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    pub fn is_online(&self) -> bool {
        self.status == ConnectionStatus::Online
    }

    pub fn retry_count(&self) -> u32 {
        self.retry_count
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn is_initializing(&self) -> bool {
        self.initializing
    }

    pub fn last_success_at(&self) -> Option<&DateTime<Local>> {
        self.last_success_at.as_ref()
    }

    pub fn on_success(&mut self, at: DateTime<Local>) -> Transition {
        let was_online = self.is_online();
        self.status = ConnectionStatus::Online;
        self.retry_count = 0;
        self.initializing = false;
        self.last_success_at = Some(at);
        if was_online {
            Transition::Refreshed
        } else {
            Transition::Connected
        }
    }

    pub fn on_failure(&mut self, reason: &dyn Display) -> Transition {
        let reason = reason.to_string();

        if self.initializing {
            self.retry_count = (self.retry_count + 1).min(self.max_retries);
            if self.retry_count >= self.max_retries {
                self.initializing = false;
                self.status = ConnectionStatus::Offline;
                return Transition::GaveUp {
                    attempts: self.max_retries,
                    reason,
                };
            }
            self.status = ConnectionStatus::Connecting;
            return Transition::Retrying {
                attempt: self.retry_count,
                max: self.max_retries,
            };
        }

        let was_online = self.is_online();
        self.status = ConnectionStatus::Offline;
        if was_online {
            Transition::Lost { reason }
        } else {
            Transition::StillOffline { reason }
        }
    }
}

impl Default for ConnectionController {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RETRIES)
    }
}
