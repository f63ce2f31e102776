//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: color blending and text helpers
//! - `layout`: screen regions, search bar, status line and footer
//! - `content`: hero and album grid
//! - `progress`: scroll gauge and back-to-top button
//! - `overlays`: modal overlays (error, help)

mod utils;
mod layout;
mod content;
mod progress;
mod overlays;

use ratatui::{layout::Rect, Frame};

use crate::animation::{Target, TweenEngine};
use crate::model::{ContentState, ScreenLayout, UiState};

pub struct AppView;

impl AppView {
    /// Regions for a terminal of the given size; stored in the model for mouse hit testing
    pub fn layout(area: Rect) -> ScreenLayout {
        layout::split(area)
    }

    pub fn render(
        frame: &mut Frame,
        screen: &ScreenLayout,
        ui_state: &UiState,
        content_state: &ContentState,
        animations: &TweenEngine,
    ) {
        progress::render_scroll_progress(frame, screen.progress, &animations.sample(Target::ScrollProgress));
        layout::render_search_bar(frame, screen, ui_state, &animations.sample(Target::SearchBar));
        layout::render_status_line(frame, screen.status, &ui_state.status);
        if let (Some(artist), false) = (&content_state.artist, content_state.is_empty()) {
            layout::render_artist_summary(frame, screen.status, artist);
        }
        content::render_results(frame, screen.results, ui_state, content_state, animations);
        layout::render_footer(frame, screen.footer, ui_state);

        if !content_state.is_empty() {
            progress::render_back_to_top(frame, screen.back_to_top, &animations.sample(Target::BackToTop));
        }

        // Error notification overlay (if there's an error)
        if ui_state.error_message.is_some() {
            overlays::render_error_notification(frame, ui_state);
        }

        // Help popup overlay (if open)
        if ui_state.show_help_popup {
            overlays::render_help_popup(frame);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::animation::FeedbackAnimator;
    use crate::model::{Album, GridGeometry, SearchOutcome, StatusLine};

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn draw(ui_state: &UiState, content_state: &ContentState, engine: &TweenEngine) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        let screen = AppView::layout(Rect::new(0, 0, 80, 30));
        terminal
            .draw(|frame| AppView::render(frame, &screen, ui_state, content_state, engine))
            .unwrap();
        screen_text(&terminal)
    }

    fn albums(count: usize) -> ContentState {
        let screen = AppView::layout(Rect::new(0, 0, 80, 30));
        ContentState {
            albums: (0..count)
                .map(|n| Album {
                    id: n.to_string(),
                    name: format!("Album {}", n),
                    release_date: format!("200{}-05-01", n),
                    image_url: None,
                    external_url: Some(format!("https://open.spotify.com/album/{}", n)),
                })
                .collect(),
            grid: GridGeometry::new(screen.results),
            ..ContentState::default()
        }
    }

    #[test]
    fn empty_results_show_the_hero() {
        let engine = TweenEngine::new();
        let text = draw(&UiState::default(), &ContentState::default(), &engine);
        assert!(text.contains("[ Search ]"));
        assert!(text.contains("press Enter to list their albums"));
        assert!(!text.contains("Back to top"));
    }

    #[test]
    fn cards_show_name_date_and_placeholders() {
        let engine = TweenEngine::new();
        let text = draw(&UiState::default(), &albums(2), &engine);
        assert!(text.contains("Album 0"));
        assert!(text.contains("2001-05-01"));
        assert!(text.contains("no cover"));
        assert!(!text.contains("press Enter to list their albums"));
    }

    #[test]
    fn back_to_top_follows_its_opacity() {
        let engine = Arc::new(TweenEngine::new());
        let _animator = FeedbackAnimator::new(engine.clone(), 15);
        let text = draw(&UiState::default(), &albums(2), &engine);
        assert!(!text.contains("Back to top"));

        let fresh = TweenEngine::new();
        let text = draw(&UiState::default(), &albums(2), &fresh);
        assert!(text.contains("Back to top"));
    }

    #[test]
    fn status_and_error_overlay_are_drawn() {
        let engine = TweenEngine::new();
        let ui_state = UiState {
            status: StatusLine::Outcome(SearchOutcome::ArtistNotFound { query: "zzqx".into() }),
            error_message: Some("request failed: boom".to_string()),
            ..UiState::default()
        };
        let text = draw(&ui_state, &ContentState::default(), &engine);
        assert!(text.contains("No artist found for \"zzqx\""));
        assert!(text.contains("request failed: boom"));
    }
}
