//! Scrolling, hover and selection in the results grid

use crate::model::{ActiveSection, HoverChange, StatusLine};
use super::AppController;

pub const WHEEL_STEP: i32 = 3;

impl AppController {
    /// Push the current scroll position to the progress bar and back-to-top cue
    pub(crate) async fn sync_scroll(&self) {
        let (offset, max_offset) = self.model.scroll_position().await;
        self.animator.on_scroll(offset, max_offset);
    }

    pub async fn scroll_lines(&self, delta: i32) {
        if self.model.scroll_by(delta).await {
            self.sync_scroll().await;
        }
    }

    pub async fn scroll_page(&self, pages: i32) {
        let height = self.model.layout().await.results.height.max(1) as i32;
        self.scroll_lines(pages * height).await;
    }

    pub async fn scroll_to_top(&self) {
        tracing::debug!("Scrolling to top");
        if self.model.scroll_to_top().await {
            self.sync_scroll().await;
        }
    }

    pub(crate) async fn back_to_top_visible(&self) -> bool {
        let (offset, _) = self.model.scroll_position().await;
        offset > self.back_to_top_threshold
    }

    pub async fn move_selection(&self, dx: i32, dy: i32) {
        let change = self.model.move_selection(dx, dy).await;
        self.apply_hover(change);
        self.sync_scroll().await;
    }

    /// Hover whatever card is under the pointer; leaving the grid drops the hover
    pub async fn hover_pointer(&self, x: u16, y: u16) {
        match self.model.hover_at(x, y).await {
            Some(change) => {
                self.apply_hover(Some(change));
                self.sync_scroll().await;
            }
            None => {
                let content = self.model.get_content_state().await;
                let over_card = content
                    .grid
                    .card_at(x, y, content.scroll_offset, content.albums.len())
                    .is_some();
                if !over_card {
                    self.leave_hover().await;
                }
            }
        }
    }

    pub async fn leave_hover(&self) {
        if let Some(index) = self.model.clear_hover().await {
            self.animator.hover_leave(index);
        }
    }

    pub async fn focus_search(&self) {
        self.model.set_active_section(ActiveSection::Search).await;
        self.leave_hover().await;
    }

    /// Move focus into the grid, if there is anything to look at
    pub async fn focus_results(&self) {
        if self.model.album_count().await == 0 {
            return;
        }
        self.model.set_active_section(ActiveSection::Results).await;
        self.move_selection(0, 0).await;
    }

    /// Cards link out to the album page; show where
    pub async fn show_selected_link(&self) {
        let Some(album) = self.model.selected_album().await else {
            return;
        };
        let note = match &album.external_url {
            Some(url) => format!("{}: {}", album.name, url),
            None => format!("{} has no external link", album.name),
        };
        tracing::info!(album_id = %album.id, album = %album.name, link = ?album.external_url, "Album link requested");
        self.model.set_status(StatusLine::Note(note)).await;
    }

    fn apply_hover(&self, change: Option<HoverChange>) {
        let Some(change) = change else {
            return;
        };
        if let Some(previous) = change.previous {
            self.animator.hover_leave(previous);
        }
        self.animator.hover_enter(change.current);
    }
}
