//! UI module root: exposes drawing functions for individual panels.

use chrono::{DateTime, Local};

use crate::dashboard::DashboardState;
use crate::scheduler::RefreshConfig;

pub mod cpu;
pub mod header;
pub mod info;
pub mod log;
pub mod mem;
pub mod players;
pub mod theme;
pub mod util;

/// Read-only inputs for one frame.
pub struct View<'a> {
    pub state: &'a DashboardState,
    pub refresh: RefreshConfig,
    pub palette: theme::Palette,
    pub server: &'a str,
    pub now: DateTime<Local>,
}
