//! Memory gauge, breakdown and history.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Sparkline},
};

use crate::summary::{clamp_pct, Severity};
use crate::ui::util::inner;
use crate::ui::View;

pub fn draw_mem(f: &mut ratatui::Frame<'_>, area: Rect, v: &View<'_>) {
    let p = &v.palette;
    f.render_widget(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(p.border))
            .title(Span::styled("Memory", Style::default().fg(p.fg))),
        area,
    );
    let Some(s) = v.state.stats_summary() else { return; };

    let body = inner(area);
    if body.height < 1 { return; }
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(body);

    let pct = clamp_pct(s.memory_pct);
    let g = Gauge::default()
        .gauge_style(
            Style::default()
                .fg(p.severity(Severity::from_percentage(pct), p.mem_used))
                .bg(p.bg),
        )
        .ratio(pct / 100.0)
        .label(format!("Used {}", s.memory_usage));
    f.render_widget(g, rows[0]);

    let key = Style::default().fg(p.muted);
    let val = Style::default().fg(p.fg);
    let lines = vec![
        Line::from(vec![
            Span::styled("Allocated  ", key),
            Span::styled(s.memory_allocated.clone(), val),
        ]),
        Line::from(vec![
            Span::styled("Free       ", key),
            Span::styled(s.memory_free.clone(), val),
        ]),
        Line::from(vec![
            Span::styled("Reservable ", key),
            Span::styled(s.memory_reservable.clone(), val),
        ]),
    ];
    f.render_widget(Paragraph::new(lines), rows[1]);
}

pub fn draw_mem_history(f: &mut ratatui::Frame<'_>, area: Rect, v: &View<'_>) {
    let p = &v.palette;
    let hist = &v.state.history;
    let title = match hist.latest() {
        Some(s) => format!(
            "Memory history (MB) — used {:.0} | allocated {:.0}",
            s.memory_used_mb, s.memory_allocated_mb
        ),
        None => "Memory history (MB)".into(),
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

    let used = hist.series(|s| s.memory_used_mb);
    let allocated = hist.series(|s| s.memory_allocated_mb);
    // Shared scale so the two lines are comparable.
    let max = allocated.iter().chain(used.iter()).copied().max().unwrap_or(0).max(1);
    for (slot, data, color) in [
        (halves[0], used, p.mem_used),
        (halves[1], allocated, p.mem_allocated),
    ] {
        let spark = Sparkline::default()
            .data(&data)
            .max(max)
            .style(Style::default().fg(color));
        f.render_widget(spark, slot);
    }
}
