//! Display formatters: sizes, durations, ratios, counts and timestamps.
//!
//! All functions are total. Missing or non-finite input maps to a placeholder
//! ("N/A") instead of failing.

use chrono::{DateTime, Local, TimeZone};

pub const NOT_AVAILABLE: &str = "N/A";

const MIB: f64 = 1024.0 * 1024.0;

/// Bytes as MB, or GB once the displayed MB value reaches 1024.00.
/// Always 2 decimals.
pub fn format_bytes(bytes: u64) -> String {
    let mb = bytes as f64 / MIB;
    if (mb * 100.0).round() / 100.0 >= 1024.0 {
        format!("{:.2} GB", mb / 1024.0)
    } else {
        format!("{mb:.2} MB")
    }
}

/// Whole MiB, rounded. Used for chart samples.
pub fn bytes_to_mb(bytes: u64) -> f64 {
    (bytes as f64 / MIB).round()
}

fn uptime_parts(ms: u64) -> Vec<String> {
    let secs = ms / 1000;
    let units = [
        (secs / 86_400, 'd'),
        (secs / 3_600 % 24, 'h'),
        (secs / 60 % 60, 'm'),
        (secs % 60, 's'),
    ];
    units
        .iter()
        .filter(|(v, _)| *v > 0)
        .map(|(v, u)| format!("{v}{u}"))
        .collect()
}

/// "1d 2h 3m 4s", skipping zero units; "0s" when below one second.
pub fn format_uptime(ms: u64) -> String {
    let parts = uptime_parts(ms);
    if parts.is_empty() {
        return "0s".into();
    }
    parts.join(" ")
}

/// Like [`format_uptime`] but keeps only the two most significant units.
pub fn format_uptime_short(ms: u64) -> String {
    let parts = uptime_parts(ms);
    if parts.is_empty() {
        return "0s".into();
    }
    parts.into_iter().take(2).collect::<Vec<_>>().join(" ")
}

/// Ratio in 0..=1 as a percentage string.
pub fn format_percentage(ratio: Option<f64>, decimals: usize) -> String {
    match ratio {
        Some(r) if r.is_finite() => format!("{:.*}%", decimals, r * 100.0),
        _ => NOT_AVAILABLE.into(),
    }
}

/// Thousands-grouped integer ("1,234,567").
pub fn format_count(n: Option<i64>) -> String {
    let Some(n) = n else {
        return NOT_AVAILABLE.into();
    };
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Epoch milliseconds as local date-time. Zero counts as missing.
pub fn format_timestamp(epoch_ms: Option<i64>) -> String {
    match epoch_ms.filter(|&ms| ms != 0) {
        Some(ms) => match Local.timestamp_millis_opt(ms).single() {
            Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => NOT_AVAILABLE.into(),
        },
        None => NOT_AVAILABLE.into(),
    }
}

/// 24h wall clock, used for chart labels and log lines.
pub fn format_clock(at: &DateTime<Local>) -> String {
    at.format("%H:%M:%S").to_string()
}

/// Age of the last successful poll: "12s ago", "5m ago", or the clock time
/// once it is older than an hour.
pub fn format_since(last: Option<&DateTime<Local>>, now: &DateTime<Local>) -> String {
    let Some(last) = last else {
        return "never".into();
    };
    let secs = now.signed_duration_since(*last).num_seconds().max(0);
    if secs < 60 {
        format!("{secs}s ago")
    } else if secs < 3600 {
        format!("{}m ago", secs / 60)
    } else {
        format_clock(last)
    }
}
