//! Color palettes for the dark and light themes.

use ratatui::style::Color;

use crate::events::{BannerLevel, LogLevel};
use crate::prefs::Theme;
use crate::summary::Severity;

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    pub muted: Color,
    pub border: Color,
    pub cpu_process: Color,
    pub cpu_system: Color,
    pub mem_used: Color,
    pub mem_allocated: Color,
    pub ok: Color,
    pub warn: Color,
    pub danger: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                bg: Color::Rgb(13, 17, 23),
                fg: Color::Rgb(230, 237, 243),
                muted: Color::Rgb(139, 148, 158),
                border: Color::Rgb(48, 54, 61),
                cpu_process: Color::Rgb(102, 126, 234),
                cpu_system: Color::Rgb(118, 75, 162),
                mem_used: Color::Rgb(67, 233, 123),
                mem_allocated: Color::Rgb(56, 249, 215),
                ok: Color::Rgb(63, 185, 80),
                warn: Color::Rgb(210, 153, 34),
                danger: Color::Rgb(248, 81, 73),
            },
            Theme::Light => Self {
                bg: Color::Rgb(255, 255, 255),
                fg: Color::Rgb(31, 35, 40),
                muted: Color::Rgb(101, 109, 118),
                border: Color::Rgb(208, 215, 222),
                cpu_process: Color::Rgb(84, 104, 214),
                cpu_system: Color::Rgb(118, 75, 162),
                mem_used: Color::Rgb(26, 160, 80),
                mem_allocated: Color::Rgb(20, 150, 140),
                ok: Color::Rgb(26, 127, 55),
                warn: Color::Rgb(154, 103, 0),
                danger: Color::Rgb(207, 34, 46),
            },
        }
    }

    /// Gauge color for a usage bar.
    pub fn severity(&self, sev: Severity, normal: Color) -> Color {
        match sev {
            Severity::Normal => normal,
            Severity::Warning => self.warn,
            Severity::Danger => self.danger,
        }
    }

    pub fn log_level(&self, level: LogLevel) -> Color {
        match level {
            LogLevel::Info => self.muted,
            LogLevel::Success => self.ok,
            LogLevel::Warning => self.warn,
            LogLevel::Error => self.danger,
        }
    }

    pub fn banner(&self, level: BannerLevel) -> Color {
        match level {
            BannerLevel::Warning => self.warn,
            BannerLevel::Error => self.danger,
        }
    }
}
