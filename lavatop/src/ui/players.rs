//! Players, audio frame statistics and uptime.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::summary::frame_loss_pct;
use crate::ui::View;

pub fn draw_players(f: &mut ratatui::Frame<'_>, area: Rect, v: &View<'_>) {
    let p = &v.palette;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(p.border))
        .title(Span::styled("Players & Frames", Style::default().fg(p.fg)));
    let Some(s) = v.state.stats_summary() else {
        f.render_widget(block, area);
        return;
    };

    let key = Style::default().fg(p.muted);
    let val = Style::default().fg(p.fg);
    let row = |k: &'static str, value: &str, style: Style| {
        Line::from(vec![Span::styled(k, key), Span::styled(value.to_string(), style)])
    };

    // Frame loss coloring: any loss is worth noticing, >5% is bad.
    let loss = v.state.snapshot().map(|snap| frame_loss_pct(&snap.stats)).unwrap_or(0.0);
    let loss_style = if loss > 5.0 {
        Style::default().fg(p.danger)
    } else if loss > 0.0 {
        Style::default().fg(p.warn)
    } else {
        Style::default().fg(p.ok)
    };

    let mut lines = vec![
        row("Active   ", &s.players, val),
        row("Playing  ", &s.playing_players, val),
        row("Guilds   ", &s.guilds, val),
        Line::default(),
        row("Sent     ", &s.frames_sent, val),
        row("Nulled   ", &s.frames_nulled, val),
        row("Deficit  ", &s.frames_deficit, val),
        row("Loss     ", &s.frame_loss, loss_style),
        Line::default(),
        row("Uptime   ", &s.uptime, val),
    ];
    if let Some(t) = &s.threads {
        lines.push(row("Threads  ", t, val));
    }
    f.render_widget(Paragraph::new(lines).block(block), area);
}
