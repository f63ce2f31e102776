//! Screen layout, search bar, status line and footer

use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

use crate::animation::Sample;
use crate::model::{ActiveSection, Artist, ScreenLayout, SearchOutcome, StatusLine, UiState};
use super::utils::{blend, rgb, ALERT_RED, IDLE_GRAY, SPOTIFY_GREEN};

const SEARCH_BUTTON_WIDTH: u16 = 14;
const BACK_TO_TOP_WIDTH: u16 = 17;
const BACK_TO_TOP_HEIGHT: u16 = 3;

pub fn split(area: Rect) -> ScreenLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Scroll progress
            Constraint::Length(3), // Search bar + button
            Constraint::Length(1), // Status line
            Constraint::Min(0),    // Hero or album grid
            Constraint::Length(1), // Key hints
        ])
        .split(area);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(SEARCH_BUTTON_WIDTH)])
        .split(chunks[1]);

    let results = chunks[3];
    let back_to_top = Rect {
        x: results.right().saturating_sub(BACK_TO_TOP_WIDTH + 1),
        y: results.bottom().saturating_sub(BACK_TO_TOP_HEIGHT),
        width: BACK_TO_TOP_WIDTH,
        height: BACK_TO_TOP_HEIGHT,
    }
    .intersection(results);

    ScreenLayout {
        progress: chunks[0],
        search: top[0],
        search_button: top[1],
        status: chunks[2],
        results,
        footer: chunks[4],
        back_to_top,
    }
}

pub fn render_search_bar(frame: &mut Frame, layout: &ScreenLayout, ui_state: &UiState, sample: &Sample) {
    let focused = ui_state.active_section == ActiveSection::Search;

    // Shake moves the whole box sideways
    let shift = sample.offset_x.round().max(0.0) as u16;
    let area = Rect {
        x: layout.search.x + shift.min(layout.search.width),
        width: layout.search.width.saturating_sub(shift),
        ..layout.search
    };

    let rest = if focused { SPOTIFY_GREEN } else { IDLE_GRAY };
    let border_color = blend(rest, ALERT_RED, sample.glow);

    let (text, text_style) = if ui_state.search_query.is_empty() {
        ("Type an artist name...", Style::default().fg(Color::DarkGray))
    } else {
        (ui_state.search_query.as_str(), Style::default().fg(Color::White))
    };

    let search = Paragraph::new(text).style(text_style).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Artist ")
            .padding(Padding::horizontal(1))
            .border_style(Style::default().fg(border_color)),
    );
    frame.render_widget(search, area);

    if focused && area.width > 4 {
        let typed = ui_state.search_query.chars().count() as u16;
        let x = (area.x + 2 + typed).min(area.right().saturating_sub(2));
        frame.set_cursor_position(Position::new(x, area.y + 1));
    }

    let button = Paragraph::new("[ Search ]")
        .style(
            Style::default()
                .fg(Color::Black)
                .bg(rgb(SPOTIFY_GREEN))
                .add_modifier(Modifier::BOLD),
        )
        .centered()
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::DarkGray)));
    frame.render_widget(button, layout.search_button);
}

pub fn render_status_line(frame: &mut Frame, area: Rect, status: &StatusLine) {
    let (text, style) = match status {
        StatusLine::Idle => (
            "Search for an artist to list their albums".to_string(),
            Style::default().fg(Color::DarkGray),
        ),
        StatusLine::Searching { query } => (
            format!("Searching for \"{}\"...", query),
            Style::default().fg(Color::Yellow),
        ),
        StatusLine::Outcome(outcome @ SearchOutcome::Populated { .. }) => {
            (outcome.message(), Style::default().fg(Color::Green))
        }
        StatusLine::Outcome(outcome) => (outcome.message(), Style::default().fg(Color::Red)),
        StatusLine::Note(note) => (note.clone(), Style::default().fg(Color::Cyan)),
    };
    frame.render_widget(Paragraph::new(format!(" {}", text)).style(style), area);
}

/// Right-aligned summary of the artist behind the current grid
pub fn render_artist_summary(frame: &mut Frame, area: Rect, artist: &Artist) {
    let mut text = format!("{} · {} followers", artist.name, group_thousands(artist.followers));
    if !artist.genres.is_empty() {
        let genres: Vec<&str> = artist.genres.iter().take(3).map(String::as_str).collect();
        text.push_str(&format!(" · {}", genres.join(", ")));
    }
    let summary = Paragraph::new(format!("{} ", text))
        .style(Style::default().fg(Color::DarkGray))
        .right_aligned();
    frame.render_widget(summary, area);
}

fn group_thousands(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub fn render_footer(frame: &mut Frame, area: Rect, ui_state: &UiState) {
    let hints: &[(&str, &str)] = match ui_state.active_section {
        ActiveSection::Search => &[("Enter", "search"), ("Tab", "albums"), ("Esc", "clear"), ("Ctrl+Q", "quit")],
        ActiveSection::Results => &[
            ("←↑↓→", "select"),
            ("PgUp/PgDn", "scroll"),
            ("t", "top"),
            ("Enter", "link"),
            ("/", "search"),
            ("h", "help"),
            ("q", "quit"),
        ],
    };

    let spans: Vec<Span> = hints
        .iter()
        .flat_map(|(key, action)| {
            [
                Span::styled(format!(" {} ", key), Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
                Span::styled(format!("{}  ", action), Style::default().fg(Color::DarkGray)),
            ]
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_stacks_regions_top_to_bottom() {
        let layout = split(Rect::new(0, 0, 100, 40));
        assert_eq!(layout.progress, Rect::new(0, 0, 100, 1));
        assert_eq!(layout.search, Rect::new(0, 1, 86, 3));
        assert_eq!(layout.search_button, Rect::new(86, 1, 14, 3));
        assert_eq!(layout.status, Rect::new(0, 4, 100, 1));
        assert_eq!(layout.results, Rect::new(0, 5, 100, 34));
        assert_eq!(layout.footer, Rect::new(0, 39, 100, 1));
    }

    #[test]
    fn back_to_top_sits_in_the_bottom_right_of_results() {
        let layout = split(Rect::new(0, 0, 100, 40));
        assert_eq!(layout.back_to_top, Rect::new(82, 36, 17, 3));
        assert!(layout.results.contains(Position::new(82, 36)));
    }

    #[test]
    fn followers_are_grouped() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(9876543), "9,876,543");
    }

    #[test]
    fn tiny_terminals_do_not_overflow() {
        let layout = split(Rect::new(0, 0, 10, 6));
        assert!(layout.back_to_top.width <= layout.results.width);
        assert!(layout.back_to_top.height <= layout.results.height);
    }
}
