//! Event log panel; newest entries stay visible at the bottom.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::format::format_clock;
use crate::ui::View;

pub fn draw_log(f: &mut ratatui::Frame<'_>, area: Rect, v: &View<'_>) {
    let p = &v.palette;
    let log = &v.state.log;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(p.border))
        .title(Span::styled(
            format!("Activity ({})", log.len()),
            Style::default().fg(p.fg),
        ));

    let visible = area.height.saturating_sub(2) as usize;
    let skip = log.len().saturating_sub(visible);
    let lines: Vec<Line> = log
        .entries()
        .skip(skip)
        .map(|e| {
            Line::from(vec![
                Span::styled(format!("{} ", format_clock(&e.at)), Style::default().fg(p.muted)),
                Span::styled(e.message.clone(), Style::default().fg(p.log_level(e.level))),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(lines).block(block), area);
}
