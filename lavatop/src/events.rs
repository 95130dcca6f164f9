//! In-UI event log (bounded) and the persistent error banner.

use std::collections::VecDeque;

use chrono::{DateTime, Local};

use crate::history::push_capped;

pub const MAX_LOG_ENTRIES: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub at: DateTime<Local>,
    pub level: LogLevel,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct EventLog {
    entries: VecDeque<LogEntry>,
    cap: usize,
}

impl EventLog {
    pub fn new(cap: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(cap + 1),
            cap,
        }
    }

    pub fn push(&mut self, level: LogLevel, message: impl Into<String>, at: DateTime<Local>) {
        let entry = LogEntry {
            at,
            level,
            message: message.into(),
        };
        push_capped(&mut self.entries, entry, self.cap);
    }

    /// Drops all entries, leaving a single "Log cleared" marker.
    pub fn clear(&mut self, at: DateTime<Local>) {
        self.entries.clear();
        self.push(LogLevel::Info, "Log cleared", at);
    }

    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &LogEntry> + ExactSizeIterator {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new(MAX_LOG_ENTRIES)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerLevel {
    Warning,
    Error,
}

/// Latest connection problem; cleared by the next successful cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub level: BannerLevel,
    pub message: String,
}

impl Banner {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: BannerLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: BannerLevel::Error,
            message: message.into(),
        }
    }
}
