//! CPU load gauges + rolling history sparklines.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Span,
    widgets::{Block, Borders, Gauge, Sparkline},
};

use crate::summary::{clamp_pct, Severity};
use crate::ui::util::inner;
use crate::ui::View;

pub fn draw_cpu(f: &mut ratatui::Frame<'_>, area: Rect, v: &View<'_>) {
    let p = &v.palette;
    let s = v.state.stats_summary();
    let title = match s {
        Some(s) => format!("CPU ({} cores)", s.cpu_cores),
        None => "CPU".into(),
    };
    f.render_widget(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(p.border))
            .title(Span::styled(title, Style::default().fg(p.fg))),
        area,
    );
    let Some(s) = s else { return; };

    let body = inner(area);
    if body.height < 2 { return; }
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
        .split(body);

    let bars = [
        ("Process", s.cpu_process_pct, &s.cpu_process, p.cpu_process),
        ("System ", s.cpu_system_pct, &s.cpu_system, p.cpu_system),
    ];
    for (row, (name, pct, label, normal)) in rows.iter().zip(bars) {
        let pct = clamp_pct(pct);
        let color = p.severity(Severity::from_percentage(pct), normal);
        let g = Gauge::default()
            .gauge_style(Style::default().fg(color).bg(p.bg))
            .ratio(pct / 100.0)
            .label(format!("{name} {label}"));
        f.render_widget(g, *row);
    }
}

pub fn draw_cpu_history(f: &mut ratatui::Frame<'_>, area: Rect, v: &View<'_>) {
    let p = &v.palette;
    let hist = &v.state.history;
    let title = match hist.latest() {
        Some(s) => format!(
            "CPU history — process {:.1}% | system {:.1}%",
            s.cpu_process_pct, s.cpu_system_pct
        ),
        None => "CPU history".into(),
    };
    f.render_widget(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(p.border))
            .title(Span::styled(title, Style::default().fg(p.fg))),
        area,
    );

    let body = inner(area);
    if body.height < 2 { return; }
    let halves = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
        .split(body);

    let process = hist.series(|s| s.cpu_process_pct);
    let system = hist.series(|s| s.cpu_system_pct);
    for (slot, data, color) in [
        (halves[0], process, p.cpu_process),
        (halves[1], system, p.cpu_system),
    ] {
        let spark = Sparkline::default()
            .data(&data)
            .max(100)
            .style(Style::default().fg(color));
        f.render_widget(spark, slot);
    }
}
