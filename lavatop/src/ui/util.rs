//! Small UI helpers: inner rects, truncation, source labels.

use ratatui::layout::Rect;

pub fn inner(area: Rect) -> Rect {
    Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

pub fn truncate_middle(s: &str, max: usize) -> String {
    let len = s.chars().count();
    if len <= max { return s.to_string(); }
    if max <= 3 { return "...".into(); }
    let keep = max - 3;
    let left = keep / 2;
    let right = keep - left;
    let head: String = s.chars().take(left).collect();
    let tail: String = s.chars().skip(len - right).collect();
    format!("{head}...{tail}")
}

pub fn source_label(name: &str) -> String {
    let label = match name.to_ascii_lowercase().as_str() {
        "youtube" => "🎬 YouTube",
        "soundcloud" => "☁️ SoundCloud",
        "bandcamp" => "🎸 Bandcamp",
        "twitch" => "📺 Twitch",
        "vimeo" => "🎥 Vimeo",
        "http" => "🌐 HTTP",
        "local" => "📁 Local",
        "spotify" => "🎧 Spotify",
        "applemusic" => "🍎 Apple Music",
        "deezer" => "🎵 Deezer",
        _ => return name.to_string(),
    };
    label.to_string()
}
