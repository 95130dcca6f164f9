//! Display strings derived from one stats/info payload.

use crate::format::{
    format_bytes, format_count, format_percentage, format_timestamp, format_uptime,
    format_uptime_short,
};
use crate::types::{Info, Stats};

const UNKNOWN: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Normal,
    Warning,
    Danger,
}

impl Severity {
    pub fn from_percentage(pct: f64) -> Self {
        let pct = clamp_pct(pct);
        if pct >= 90.0 {
            Severity::Danger
        } else if pct >= 70.0 {
            Severity::Warning
        } else {
            Severity::Normal
        }
    }
}

/// Clamp to 0..=100; NaN becomes 0.
pub fn clamp_pct(pct: f64) -> f64 {
    if pct.is_nan() {
        0.0
    } else {
        pct.clamp(0.0, 100.0)
    }
}

/// used / allocated, `None` when nothing is allocated.
pub fn memory_ratio(stats: &Stats) -> Option<f64> {
    let m = &stats.memory;
    (m.allocated > 0).then(|| m.used as f64 / m.allocated as f64)
}

/// Share of frames that were nulled or missing, in percent.
pub fn frame_loss_pct(stats: &Stats) -> f64 {
    let Some(fs) = stats.frame_stats.as_ref() else {
        return 0.0;
    };
    let lost = fs.nulled as f64 + fs.deficit as f64;
    let total = fs.sent as f64 + lost;
    if total > 0.0 {
        lost / total * 100.0
    } else {
        0.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatsSummary {
    pub memory_used: String,
    pub memory_allocated: String,
    pub memory_free: String,
    pub memory_reservable: String,
    pub memory_pct: f64,
    pub memory_usage: String,

    pub cpu_process: String,
    pub cpu_system: String,
    pub cpu_process_pct: f64,
    pub cpu_system_pct: f64,
    pub cpu_cores: String,

    pub quick_cpu: String,
    pub quick_memory: String,

    pub players: String,
    pub playing_players: String,
    pub guilds: String,

    pub frames_sent: String,
    pub frames_nulled: String,
    pub frames_deficit: String,
    pub frame_loss: String,

    pub uptime: String,
    pub uptime_short: String,
    pub threads: Option<String>,
}

impl StatsSummary {
    pub fn from_stats(stats: &Stats) -> Self {
        let mem = &stats.memory;
        let ratio = memory_ratio(stats);
        let memory_used = format_bytes(mem.used);
        let frames = stats.frame_stats.clone().unwrap_or_default();

        Self {
            memory_usage: format!("{memory_used} ({})", format_percentage(ratio, 1)),
            memory_used,
            memory_allocated: format_bytes(mem.allocated),
            memory_free: format_bytes(mem.free),
            memory_reservable: format_bytes(mem.reservable),
            memory_pct: ratio.map(|r| r * 100.0).unwrap_or(0.0),

            cpu_process: format_percentage(Some(stats.cpu.lavalink_load), 1),
            cpu_system: format_percentage(Some(stats.cpu.system_load), 1),
            cpu_process_pct: stats.cpu.lavalink_load * 100.0,
            cpu_system_pct: stats.cpu.system_load * 100.0,
            cpu_cores: stats.cpu.cores.to_string(),

            quick_cpu: format_percentage(Some(stats.cpu.lavalink_load), 0),
            quick_memory: format_percentage(ratio, 0),

            players: format_count(Some(stats.players as i64)),
            playing_players: format_count(Some(stats.playing_players as i64)),
            guilds: format_count(Some(stats.players as i64)),

            frames_sent: format_count(Some(frames.sent as i64)),
            frames_nulled: format_count(Some(frames.nulled as i64)),
            frames_deficit: format_count(Some(frames.deficit)),
            frame_loss: format!("{:.2}%", frame_loss_pct(stats)),

            uptime: format_uptime(stats.uptime),
            uptime_short: format_uptime_short(stats.uptime),
            threads: stats.threads.as_ref().map(|t| {
                format!(
                    "{} running / {} daemon / {} peak",
                    format_count(Some(t.running as i64)),
                    format_count(Some(t.daemon as i64)),
                    format_count(Some(t.peak as i64)),
                )
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PluginLine {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InfoSummary {
    pub version: String,
    pub build_time: String,
    pub git_branch: String,
    pub git_commit: String,
    pub jvm: String,
    pub lavaplayer: String,
    pub os_name: String,
    pub os_arch: String,
    pub sources: Vec<String>,
    pub plugins: Vec<PluginLine>,
}

fn or_unknown(v: Option<&String>) -> String {
    v.filter(|s| !s.is_empty())
        .cloned()
        .unwrap_or_else(|| UNKNOWN.into())
}

impl InfoSummary {
    pub fn from_info(info: &Info) -> Self {
        let os_name = format!(
            "{} {}",
            or_unknown(info.os.name.as_ref()),
            info.os.version.as_deref().unwrap_or_default()
        )
        .trim()
        .to_string();

        Self {
            version: or_unknown(info.version.semver.as_ref()),
            build_time: format_timestamp(info.build_timestamp()),
            git_branch: or_unknown(info.git.branch.as_ref()),
            git_commit: info
                .git
                .commit
                .as_deref()
                .filter(|c| !c.is_empty())
                .map(|c| c.chars().take(7).collect())
                .unwrap_or_else(|| UNKNOWN.into()),
            jvm: or_unknown(info.jvm.as_ref()),
            lavaplayer: or_unknown(info.lavaplayer.as_ref()),
            os_name,
            os_arch: or_unknown(info.os.arch.as_ref()),
            sources: info.source_managers.clone(),
            plugins: info
                .plugins
                .iter()
                .map(|p| PluginLine {
                    name: p
                        .name
                        .clone()
                        .filter(|n| !n.is_empty())
                        .unwrap_or_else(|| "Unknown Plugin".into()),
                    version: p
                        .version
                        .clone()
                        .filter(|v| !v.is_empty())
                        .unwrap_or_else(|| "?".into()),
                })
                .collect(),
        }
    }
}
