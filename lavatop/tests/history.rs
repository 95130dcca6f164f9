//! Rolling metrics buffer.

use lavatop::history::{push_capped, MetricSample, MetricsHistory, CHART_MAX_POINTS};
use lavatop::types::{Cpu, Memory, Stats};
use std::collections::VecDeque;

fn sample(i: usize) -> MetricSample {
    MetricSample {
        timestamp_label: format!("t{i}"),
        cpu_process_pct: i as f64,
        cpu_system_pct: 0.0,
        memory_used_mb: 0.0,
        memory_allocated_mb: 0.0,
    }
}

#[test]
fn holds_the_most_recent_thirty_in_push_order() {
    let mut h = MetricsHistory::default();
    for k in 1..=75 {
        h.push(sample(k));
        let snap = h.snapshot();
        assert_eq!(snap.len(), k.min(CHART_MAX_POINTS));
        let first = k.saturating_sub(CHART_MAX_POINTS) + 1;
        let labels: Vec<String> = snap.iter().map(|s| s.timestamp_label.clone()).collect();
        let expected: Vec<String> = (first..=k).map(|i| format!("t{i}")).collect();
        assert_eq!(labels, expected);
    }
    assert_eq!(h.latest().unwrap().timestamp_label, "t75");
}

#[test]
fn series_rounds_and_clamps() {
    let mut h = MetricsHistory::new(3);
    for v in [-5.0, 12.4, 12.6, 99.5] {
        h.push(MetricSample { cpu_process_pct: v, ..sample(0) });
    }
    assert_eq!(h.series(|s| s.cpu_process_pct), vec![12, 13, 100]);
}

#[test]
fn sample_from_stats_scales_units() {
    let stats = Stats {
        cpu: Cpu { cores: 4, system_load: 0.5, lavalink_load: 0.25 },
        memory: Memory { used: 500 * 1024 * 1024, allocated: 1024 * 1024 * 1024, ..Default::default() },
        ..Default::default()
    };
    let s = MetricSample::from_stats(&stats, "12:00:00".into());
    assert_eq!(s.cpu_process_pct, 25.0);
    assert_eq!(s.cpu_system_pct, 50.0);
    assert_eq!(s.memory_used_mb, 500.0);
    assert_eq!(s.memory_allocated_mb, 1024.0);
}

#[test]
fn push_capped_evicts_oldest() {
    let mut dq = VecDeque::new();
    for v in 0..5 {
        push_capped(&mut dq, v, 3);
    }
    assert_eq!(dq, VecDeque::from(vec![2, 3, 4]));
}
