//! Top header (status badge, version, last update), error banner and footer.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::connection::ConnectionStatus;
use crate::format::format_since;
use crate::ui::View;

pub fn draw_header(f: &mut ratatui::Frame<'_>, area: Rect, v: &View<'_>) {
    let p = &v.palette;
    let conn = &v.state.connection;
    let badge_color = match conn.status() {
        ConnectionStatus::Online => p.ok,
        ConnectionStatus::Connecting => p.warn,
        ConnectionStatus::Offline => p.danger,
    };
    let version = v.state.version().unwrap_or("v?");
    let uptime = v
        .state
        .stats_summary()
        .map(|s| s.uptime_short.as_str())
        .unwrap_or("-");

    let line = Line::from(vec![
        Span::styled(
            "lavatop",
            Style::default().fg(p.fg).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" — {} ", v.server), Style::default().fg(p.muted)),
        Span::styled(
            format!("● {}", conn.status().label()),
            Style::default().fg(badge_color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(
                " | {version} | up {uptime} | last update: {}",
                format_since(conn.last_success_at(), &v.now)
            ),
            Style::default().fg(p.muted),
        ),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

/// One-line banner; renders nothing when there is no active problem.
pub fn draw_banner(f: &mut ratatui::Frame<'_>, area: Rect, v: &View<'_>) {
    let Some(banner) = v.state.banner() else { return; };
    let color = v.palette.banner(banner.level);
    let line = Line::from(Span::styled(
        format!(" ⚠ {}", banner.message),
        Style::default().fg(v.palette.bg).bg(color).add_modifier(Modifier::BOLD),
    ));
    f.render_widget(Paragraph::new(line).style(Style::default().bg(color)), area);
}

pub fn draw_footer(f: &mut ratatui::Frame<'_>, area: Rect, v: &View<'_>) {
    let p = &v.palette;
    let line = Line::from(vec![
        Span::styled(v.refresh.describe(), Style::default().fg(p.fg)),
        Span::styled(
            "  |  q quit  p pause  +/- interval  r refresh  t theme  c clear log",
            Style::default().fg(p.muted),
        ),
    ]);
    f.render_widget(Paragraph::new(line), area);
}
