//! Server info, enabled sources and loaded plugins.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::ui::util::{source_label, truncate_middle};
use crate::ui::View;

pub fn draw_server_info(f: &mut ratatui::Frame<'_>, area: Rect, v: &View<'_>) {
    let p = &v.palette;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(p.border))
        .title(Span::styled("Server", Style::default().fg(p.fg)));
    let Some(info) = v.state.info_summary() else {
        f.render_widget(block, area);
        return;
    };

    let width = area.width.saturating_sub(14) as usize;
    let key = Style::default().fg(p.muted);
    let val = Style::default().fg(p.fg);
    let row = |k: &'static str, value: &str| {
        Line::from(vec![
            Span::styled(k, key),
            Span::styled(truncate_middle(value, width), val),
        ])
    };
    let lines = vec![
        row("Version    ", &info.version),
        row("Build      ", &info.build_time),
        row("Branch     ", &info.git_branch),
        row("Commit     ", &info.git_commit),
        row("JVM        ", &info.jvm),
        row("Lavaplayer ", &info.lavaplayer),
        row("OS         ", &info.os_name),
        row("Arch       ", &info.os_arch),
    ];
    f.render_widget(Paragraph::new(lines).block(block), area);
}

pub fn draw_sources_plugins(f: &mut ratatui::Frame<'_>, area: Rect, v: &View<'_>) {
    let p = &v.palette;
    let cols = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let sources_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(p.border))
        .title(Span::styled("Sources", Style::default().fg(p.fg)));
    let plugins_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(p.border))
        .title(Span::styled("Plugins", Style::default().fg(p.fg)));

    let Some(info) = v.state.info_summary() else {
        f.render_widget(sources_block, cols[0]);
        f.render_widget(plugins_block, cols[1]);
        return;
    };

    let sources: Vec<Line> = if info.sources.is_empty() {
        vec![Line::from(Span::styled("No sources available", Style::default().fg(p.muted)))]
    } else {
        info.sources
            .iter()
            .map(|s| {
                Line::from(vec![
                    Span::styled("✓ ", Style::default().fg(p.ok)),
                    Span::styled(source_label(s), Style::default().fg(p.fg)),
                ])
            })
            .collect()
    };
    f.render_widget(Paragraph::new(sources).block(sources_block), cols[0]);

    let plugins: Vec<Line> = if info.plugins.is_empty() {
        vec![Line::from(Span::styled("No plugins loaded", Style::default().fg(p.muted)))]
    } else {
        info.plugins
            .iter()
            .map(|pl| {
                Line::from(vec![
                    Span::styled(pl.name.clone(), Style::default().fg(p.fg)),
                    Span::styled(format!(" {}", pl.version), Style::default().fg(p.muted)),
                ])
            })
            .collect()
    };
    f.render_widget(Paragraph::new(plugins).block(plugins_block), cols[1]);
}
