//! Results area rendering (hero or album grid)

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Padding, Paragraph},
    Frame,
};

use crate::animation::{Sample, Target, TweenEngine};
use crate::model::{ActiveSection, Album, ContentState, UiState};
use super::utils::{blend, faded, reveal_line, rgb, truncate_string, IDLE_GRAY, SPOTIFY_GREEN};

const LOGO: [&str; 3] = [
    "╺┳┓╻┏━┓┏━╸┏━┓┏━╸┏━┓┏━┓┏━┓╻ ╻╻ ╻",
    " ┃┃┃┗━┓┃  ┃ ┃┃╺┓┣┳┛┣━┫┣━┛┣━┫┗┳┛",
    "╺┻┛╹┗━┛┗━╸┗━┛┗━┛╹┗╸╹ ╹╹  ╹ ╹ ╹ ",
];

pub fn render_results(
    frame: &mut Frame,
    area: Rect,
    ui_state: &UiState,
    content_state: &ContentState,
    animations: &TweenEngine,
) {
    if content_state.is_empty() {
        render_hero(frame, area, &animations.sample(Target::Logo));
    } else {
        render_grid(frame, ui_state, content_state, animations);
    }
}

fn render_hero(frame: &mut Frame, area: Rect, logo: &Sample) {
    let mut lines: Vec<Line> = vec![Line::from("")];
    lines.extend(LOGO.iter().map(|row| {
        Line::from(Span::styled(
            reveal_line(row, logo.reveal),
            Style::default().fg(rgb(SPOTIFY_GREEN)).add_modifier(Modifier::BOLD),
        ))
    }));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Type an artist name and press Enter to list their albums",
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(Span::styled(
        "Tab moves into the grid, h shows every key",
        Style::default().fg(Color::DarkGray),
    )));

    let hero = Paragraph::new(lines).centered();
    frame.render_widget(hero, area);
}

fn render_grid(frame: &mut Frame, ui_state: &UiState, content_state: &ContentState, animations: &TweenEngine) {
    let grid = &content_state.grid;
    let results_focused = ui_state.active_section == ActiveSection::Results;

    for (index, album) in content_state.albums.iter().enumerate() {
        let Some(cell) = grid.card_rect(index, content_state.scroll_offset) else {
            continue;
        };
        let sample = animations.sample(Target::Card(index));
        let highlighted = results_focused && index == content_state.selected;
        render_card(frame, cell, album, &sample, highlighted);
    }
}

fn render_card(frame: &mut Frame, cell: Rect, album: &Album, sample: &Sample, highlighted: bool) {
    // Entrance rise pushes the card down inside its own cell
    let drop = sample.offset_y.round().max(0.0) as u16;
    let area = Rect {
        x: cell.x,
        y: cell.y + drop.min(cell.height),
        width: cell.width.saturating_sub(1),
        height: cell.height.saturating_sub(drop),
    };
    if area.height < 2 || area.width < 4 {
        return;
    }

    let text_color = faded(sample.opacity);
    let border_base = if highlighted { SPOTIFY_GREEN } else { IDLE_GRAY };
    let border_color = blend(border_base, SPOTIFY_GREEN, sample.glow);
    let border_type = if sample.scale > 1.01 { BorderType::Thick } else { BorderType::Rounded };

    let inner_width = area.width.saturating_sub(4) as usize;
    let cover = match &album.image_url {
        Some(url) => format!("cover {}", url),
        None => "no cover art".to_string(),
    };
    let link = album.external_url.as_deref().unwrap_or("no link");
    let lines = vec![
        Line::from(Span::styled(
            truncate_string(&album.release_date, inner_width),
            Style::default().fg(text_color),
        )),
        Line::from(Span::styled(
            truncate_string(&cover, inner_width),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            truncate_string(link, inner_width),
            Style::default().fg(Color::Cyan),
        )),
    ];

    let mut title_style = Style::default().fg(text_color).add_modifier(Modifier::BOLD);
    if highlighted {
        title_style = title_style.fg(border_color);
    }

    let card = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(border_type)
            .border_style(Style::default().fg(border_color))
            .title(Span::styled(
                format!(" {} ", truncate_string(&album.name, inner_width).trim_end()),
                title_style,
            ))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(card, area);
}
