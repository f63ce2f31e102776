//! Utility functions for rendering UI components

use ratatui::style::Color;

pub const SPOTIFY_GREEN: (u8, u8, u8) = (30, 215, 96);
pub const ALERT_RED: (u8, u8, u8) = (230, 57, 70);
pub const IDLE_GRAY: (u8, u8, u8) = (110, 110, 110);
const FADED: (u8, u8, u8) = (35, 35, 35);
const BRIGHT: (u8, u8, u8) = (235, 235, 235);

pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.chars().count() > max_width {
        let truncated: String = s.chars().take(max_width.saturating_sub(3)).collect();
        format!("{:<width$}", format!("{}...", truncated), width = max_width)
    } else {
        format!("{:<width$}", s, width = max_width)
    }
}

pub fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(r, g, b)
}

/// Linear mix of two colors, `t` clamped to 0..=1
pub fn blend(from: (u8, u8, u8), to: (u8, u8, u8), t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
    Color::Rgb(mix(from.0, to.0), mix(from.1, to.1), mix(from.2, to.2))
}

/// Terminals have no alpha, so opacity becomes foreground brightness
pub fn faded(opacity: f32) -> Color {
    blend(FADED, BRIGHT, opacity)
}

/// First `reveal` share of each line, keeping the line width stable
pub fn reveal_line(line: &str, reveal: f32) -> String {
    let total = line.chars().count();
    let shown = (total as f32 * reveal.clamp(0.0, 1.0)).round() as usize;
    line.chars()
        .enumerate()
        .map(|(i, c)| if i < shown { c } else { ' ' })
        .collect()
}
