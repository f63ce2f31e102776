//! Scroll feedback: the progress gauge and the back-to-top button

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::animation::Sample;
use super::utils::{faded, rgb, SPOTIFY_GREEN};

/// Below this the button counts as hidden
const VISIBLE_OPACITY: f32 = 0.05;

/// Thin bar across the top, `sample.width` is a percentage of the scrollable range
pub fn render_scroll_progress(frame: &mut Frame, area: Rect, sample: &Sample) {
    let filled = (area.width as f32 * (sample.width / 100.0).clamp(0.0, 1.0)).round() as usize;
    let empty = (area.width as usize).saturating_sub(filled);
    let line = Line::from(vec![
        Span::styled("━".repeat(filled), Style::default().fg(rgb(SPOTIFY_GREEN))),
        Span::styled("─".repeat(empty), Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

pub fn back_to_top_visible(sample: &Sample) -> bool {
    sample.opacity > VISIBLE_OPACITY
}

/// Pops in with a scale from 0.6; until it is near full size only the arrow fits
pub fn render_back_to_top(frame: &mut Frame, area: Rect, sample: &Sample) {
    if !back_to_top_visible(sample) || area.width < 5 || area.height < 3 {
        return;
    }

    let label = if sample.scale < 0.9 { "↑" } else { "↑ Back to top" };
    let color = faded(sample.opacity);

    frame.render_widget(Clear, area);
    let button = Paragraph::new(label)
        .centered()
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(color))
                .style(Style::default().bg(Color::Black)),
        );
    frame.render_widget(button, area);
}
