//! Main application model with state management

use ratatui::layout::Rect;
use std::time::Instant;
use tokio::sync::Mutex;

use super::content::{Album, Artist, ContentState, GridGeometry};
use super::types::{ActiveSection, ScreenLayout, SearchOutcome, StatusLine, UiState};

/// How the result set changed when a search response was applied
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppliedSearch {
    pub was_empty: bool,
    pub count: usize,
    /// Card that was hovered in the replaced result set
    pub previous_hover: Option<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HoverChange {
    pub previous: Option<usize>,
    pub current: usize,
}

/// Main application model containing all state.
///
/// Lock order is content before ui wherever both are held.
pub struct AppModel {
    pub ui_state: Mutex<UiState>,
    pub content_state: Mutex<ContentState>,
    should_quit: Mutex<bool>,
}

impl Default for AppModel {
    fn default() -> Self {
        Self::new()
    }
}

impl AppModel {
    pub fn new() -> Self {
        Self {
            ui_state: Mutex::new(UiState::default()),
            content_state: Mutex::new(ContentState::default()),
            should_quit: Mutex::new(false),
        }
    }

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
    }

    // ========================================================================
    // UI state
    // ========================================================================

    pub async fn get_ui_state(&self) -> UiState {
        self.ui_state.lock().await.clone()
    }

    pub async fn set_active_section(&self, section: ActiveSection) {
        self.ui_state.lock().await.active_section = section;
    }

    /// Record where the last frame put everything; the results area doubles as the grid viewport
    pub async fn set_layout(&self, layout: ScreenLayout) {
        self.set_viewport(layout.results).await;
        self.ui_state.lock().await.layout = layout;
    }

    pub async fn layout(&self) -> ScreenLayout {
        self.ui_state.lock().await.layout
    }

    pub async fn search_query(&self) -> String {
        self.ui_state.lock().await.search_query.clone()
    }

    pub async fn update_search_query(&self, query: String) {
        self.ui_state.lock().await.search_query = query;
    }

    pub async fn append_to_search(&self, c: char) {
        self.ui_state.lock().await.search_query.push(c);
    }

    pub async fn backspace_search(&self) {
        self.ui_state.lock().await.search_query.pop();
    }

    pub async fn set_status(&self, status: StatusLine) {
        self.ui_state.lock().await.status = status;
    }

    pub async fn set_error(&self, message: String) {
        let mut state = self.ui_state.lock().await;
        state.error_message = Some(message);
        state.error_timestamp = Some(Instant::now());
    }

    pub async fn clear_error(&self) {
        let mut state = self.ui_state.lock().await;
        state.error_message = None;
        state.error_timestamp = None;
    }

    pub async fn has_error(&self) -> bool {
        self.ui_state.lock().await.error_message.is_some()
    }

    pub async fn auto_clear_old_errors(&self) {
        let mut state = self.ui_state.lock().await;
        if let Some(timestamp) = state.error_timestamp {
            if timestamp.elapsed().as_secs() > 5 {
                state.error_message = None;
                state.error_timestamp = None;
            }
        }
    }

    pub async fn show_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = true;
    }

    pub async fn hide_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = false;
    }

    pub async fn is_help_popup_open(&self) -> bool {
        self.ui_state.lock().await.show_help_popup
    }

    // ========================================================================
    // Search lifecycle
    // ========================================================================

    /// Register a new submission and return its sequence number
    pub async fn begin_search(&self, query: &str) -> u64 {
        let mut content = self.content_state.lock().await;
        content.latest_search += 1;
        let seq = content.latest_search;

        let mut ui = self.ui_state.lock().await;
        ui.status = StatusLine::Searching {
            query: query.to_string(),
        };
        seq
    }

    /// Apply the response of search `seq`.
    ///
    /// `replacement` carries the new result set when the artist was found.
    /// Returns `None` when a newer search has been submitted since.
    pub async fn apply_search(
        &self,
        seq: u64,
        outcome: SearchOutcome,
        replacement: Option<(Artist, Vec<Album>)>,
    ) -> Option<AppliedSearch> {
        let mut content = self.content_state.lock().await;
        if content.latest_search != seq {
            return None;
        }

        let was_empty = content.is_empty();
        let mut applied = AppliedSearch {
            was_empty,
            count: content.albums.len(),
            previous_hover: None,
        };

        if let Some((artist, albums)) = replacement {
            applied.previous_hover = content.hovered.take();
            applied.count = albums.len();
            content.albums = albums;
            content.artist = Some(artist);
            content.selected = 0;
            content.scroll_offset = 0;
        }

        let mut ui = self.ui_state.lock().await;
        if matches!(outcome, SearchOutcome::Populated { .. }) {
            ui.active_section = ActiveSection::Results;
        } else if content.is_empty() {
            ui.active_section = ActiveSection::Search;
        }
        ui.status = StatusLine::Outcome(outcome);

        Some(applied)
    }

    // ========================================================================
    // Results grid
    // ========================================================================

    pub async fn get_content_state(&self) -> ContentState {
        self.content_state.lock().await.clone()
    }

    pub async fn album_count(&self) -> usize {
        self.content_state.lock().await.albums.len()
    }

    pub async fn selected_album(&self) -> Option<Album> {
        self.content_state.lock().await.selected_album().cloned()
    }

    /// Current scroll offset and the largest reachable offset
    pub async fn scroll_position(&self) -> (u16, u16) {
        let content = self.content_state.lock().await;
        (content.scroll_offset, content.max_offset())
    }

    pub async fn set_viewport(&self, area: Rect) {
        let mut content = self.content_state.lock().await;
        if content.grid.area == area {
            return;
        }
        content.grid = GridGeometry::new(area);
        content.scroll_offset = content.scroll_offset.min(content.max_offset());
    }

    /// Scroll by `delta` lines, returns whether the offset changed
    pub async fn scroll_by(&self, delta: i32) -> bool {
        let mut content = self.content_state.lock().await;
        let max = content.max_offset() as i32;
        let next = (content.scroll_offset as i32 + delta).clamp(0, max) as u16;
        let changed = next != content.scroll_offset;
        content.scroll_offset = next;
        changed
    }

    pub async fn scroll_to_top(&self) -> bool {
        let mut content = self.content_state.lock().await;
        let changed = content.scroll_offset != 0;
        content.scroll_offset = 0;
        changed
    }

    /// Move the selection by whole columns/rows and keep it in view
    pub async fn move_selection(&self, dx: i32, dy: i32) -> Option<HoverChange> {
        let mut content = self.content_state.lock().await;
        let count = content.albums.len();
        if count == 0 {
            return None;
        }

        let columns = content.grid.columns as i32;
        let current = content.selected as i32;
        let next = (current + dx + dy * columns).clamp(0, count as i32 - 1) as usize;
        Self::select(&mut content, next)
    }

    /// Hover the card under the pointer, if any
    pub async fn hover_at(&self, x: u16, y: u16) -> Option<HoverChange> {
        let mut content = self.content_state.lock().await;
        let index = content
            .grid
            .card_at(x, y, content.scroll_offset, content.albums.len())?;
        Self::select(&mut content, index)
    }

    /// Drop the hover highlight, returning the card that had it
    pub async fn clear_hover(&self) -> Option<usize> {
        self.content_state.lock().await.hovered.take()
    }

    fn select(content: &mut ContentState, index: usize) -> Option<HoverChange> {
        let previous = content.hovered;
        content.selected = index;
        content.hovered = Some(index);
        content.scroll_offset = content.grid.offset_to_show(index, content.scroll_offset);

        (previous != Some(index)).then_some(HoverChange {
            previous,
            current: index,
        })
    }
}
