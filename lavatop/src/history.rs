//! Bounded history buffers feeding the CPU and memory charts.

use std::collections::VecDeque;

use crate::format::bytes_to_mb;
use crate::types::Stats;

/// Samples kept per chart.
pub const CHART_MAX_POINTS: usize = 30;

pub fn push_capped<T>(dq: &mut VecDeque<T>, v: T, cap: usize) {
    dq.push_back(v);
    while dq.len() > cap {
        dq.pop_front();
    }
}

/// One successful poll, reduced to what the charts plot.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSample {
    pub timestamp_label: String,
    pub cpu_process_pct: f64,
    pub cpu_system_pct: f64,
    pub memory_used_mb: f64,
    pub memory_allocated_mb: f64,
}

impl MetricSample {
    pub fn from_stats(stats: &Stats, timestamp_label: String) -> Self {
        Self {
            timestamp_label,
            cpu_process_pct: stats.cpu.lavalink_load * 100.0,
            cpu_system_pct: stats.cpu.system_load * 100.0,
            memory_used_mb: bytes_to_mb(stats.memory.used),
            memory_allocated_mb: bytes_to_mb(stats.memory.allocated),
        }
    }
}

/// Fixed-capacity FIFO of the most recent samples, oldest first.
#[derive(Debug, Clone)]
pub struct MetricsHistory {
    samples: VecDeque<MetricSample>,
    cap: usize,
}

impl MetricsHistory {
    pub fn new(cap: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(cap + 1),
            cap,
        }
    }

    pub fn push(&mut self, sample: MetricSample) {
        push_capped(&mut self.samples, sample, self.cap);
    }

    pub fn snapshot(&self) -> Vec<MetricSample> {
        self.samples.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn latest(&self) -> Option<&MetricSample> {
        self.samples.back()
    }

    // Sparkline data for one field, rounded and clamped at zero.
    pub fn series(&self, field: impl Fn(&MetricSample) -> f64) -> Vec<u64> {
        self.samples
            .iter()
            .map(|s| field(s).max(0.0).round() as u64)
            .collect()
    }
}

impl Default for MetricsHistory {
    fn default() -> Self {
        Self::new(CHART_MAX_POINTS)
    }
}
