//! Shared UI theme constants and the light/dark palettes.

use ratatui::style::Color;

use crate::banner::Severity;
use crate::prefs::Theme;
use crate::render::UsageLevel;

// Scrollbar colors
pub const SB_ARROW: Color = Color::Rgb(170, 170, 180);
pub const SB_TRACK: Color = Color::Rgb(170, 170, 180);
pub const SB_THUMB: Color = Color::Rgb(170, 170, 180);

pub const CPU_SERIES: Color = Color::Rgb(0x3b, 0x82, 0xf6);
pub const MEMORY_SERIES: Color = Color::Rgb(0x8b, 0x5c, 0xf6);

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    pub muted: Color,
    pub grid: Color,
    pub text: Color,
    pub header: Color,
}

pub fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Light => Palette {
            bg: Color::Rgb(0xf7, 0xfa, 0xfc),
            fg: Color::Rgb(0x2d, 0x37, 0x48),
            muted: Color::Rgb(0xa0, 0xae, 0xc0),
            grid: Color::Rgb(0xe2, 0xe8, 0xf0),
            text: Color::Rgb(0x71, 0x80, 0x96),
            header: Color::Rgb(0x25, 0x63, 0xeb),
        },
        Theme::Dark => Palette {
            bg: Color::Rgb(0x0f, 0x17, 0x2a),
            fg: Color::Rgb(0xe2, 0xe8, 0xf0),
            muted: Color::Rgb(0x64, 0x74, 0x8b),
            grid: Color::Rgb(0x33, 0x41, 0x55),
            text: Color::Rgb(0x94, 0xa3, 0xb8),
            header: Color::Rgb(0x60, 0xa5, 0xfa),
        },
    }
}

pub fn level_color(level: UsageLevel) -> Color {
    match level {
        UsageLevel::Low => Color::Rgb(0x10, 0xb9, 0x81),
        UsageLevel::Medium => Color::Rgb(0xf5, 0x9e, 0x0b),
        UsageLevel::High => Color::Rgb(0xef, 0x44, 0x44),
    }
}

pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Error => Color::Rgb(0xef, 0x44, 0x44),
        Severity::Warning => Color::Rgb(0xf5, 0x9e, 0x0b),
        Severity::Info | Severity::Success => Color::Rgb(0x3b, 0x82, 0xf6),
    }
}
