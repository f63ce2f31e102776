//! Core type definitions for the application

use ratatui::layout::Rect;
use std::time::Instant;

/// Which part of the UI has keyboard focus
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveSection {
    Search,
    Results,
}

/// What the last submitted search ended with
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The result set was replaced with this many albums
    Populated { artist: String, count: usize },
    EmptyQuery,
    ArtistNotFound { query: String },
    /// The artist exists but the album listing came back empty
    NoAlbums { artist: String },
    /// Transport, auth or parse failure
    Failed { reason: String },
    /// A newer search was submitted before this one resolved
    Superseded,
}

impl SearchOutcome {
    /// Every outcome except a populated result (or a discarded one) plays the failure cue
    pub fn is_failure(&self) -> bool {
        !matches!(self, SearchOutcome::Populated { .. } | SearchOutcome::Superseded)
    }

    pub fn message(&self) -> String {
        match self {
            SearchOutcome::Populated { artist, count } => {
                let noun = if *count == 1 { "album" } else { "albums" };
                format!("{} {} by {}", count, noun, artist)
            }
            SearchOutcome::EmptyQuery => "Enter an artist name to search".to_string(),
            SearchOutcome::ArtistNotFound { query } => format!("No artist found for \"{}\"", query),
            SearchOutcome::NoAlbums { artist } => format!("{} has no albums in this market", artist),
            SearchOutcome::Failed { reason } => format!("Search failed: {}", reason),
            SearchOutcome::Superseded => String::new(),
        }
    }
}

/// Status line content
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum StatusLine {
    #[default]
    Idle,
    Searching { query: String },
    Outcome(SearchOutcome),
    /// Free-form note, e.g. the link of the selected album
    Note(String),
}

/// Where each region was drawn in the last frame, used for mouse hit testing
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScreenLayout {
    pub progress: Rect,
    pub search: Rect,
    pub search_button: Rect,
    pub status: Rect,
    pub results: Rect,
    pub footer: Rect,
    pub back_to_top: Rect,
}

/// UI state for the application
#[derive(Clone, Debug)]
pub struct UiState {
    pub active_section: ActiveSection,
    pub search_query: String,
    pub status: StatusLine,
    pub error_message: Option<String>,
    pub error_timestamp: Option<Instant>,
    pub show_help_popup: bool,
    pub layout: ScreenLayout,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            active_section: ActiveSection::Search,
            search_query: String::new(),
            status: StatusLine::Idle,
            error_message: None,
            error_timestamp: None,
            show_help_popup: false,
            layout: ScreenLayout::default(),
        }
    }
}
