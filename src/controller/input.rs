//! Key and mouse event handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

use crate::model::ActiveSection;
use super::navigation::WHEEL_STEP;
use super::AppController;

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let model = &self.model;

        // Error overlay swallows everything until dismissed
        if model.has_error().await {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                model.clear_error().await;
            }
            return Ok(());
        }

        if model.is_help_popup_open().await {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('H')) {
                model.hide_help_popup().await;
            }
            return Ok(());
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c')) {
                model.set_should_quit(true).await;
            }
            return Ok(());
        }

        let ui_state = model.get_ui_state().await;
        match ui_state.active_section {
            ActiveSection::Search => match key.code {
                KeyCode::Enter => {
                    self.spawn_submit().await;
                }
                KeyCode::Esc => self.set_query(String::new()).await,
                KeyCode::Backspace => model.backspace_search().await,
                KeyCode::Tab | KeyCode::BackTab | KeyCode::Down => self.focus_results().await,
                KeyCode::Char(c) => model.append_to_search(c).await,
                _ => {}
            },
            ActiveSection::Results => match key.code {
                KeyCode::Up => self.move_selection(0, -1).await,
                KeyCode::Down => self.move_selection(0, 1).await,
                KeyCode::Left => self.move_selection(-1, 0).await,
                KeyCode::Right => self.move_selection(1, 0).await,
                KeyCode::PageUp => self.scroll_page(-1).await,
                KeyCode::PageDown => self.scroll_page(1).await,
                KeyCode::Home | KeyCode::Char('t') | KeyCode::Char('T') => self.scroll_to_top().await,
                KeyCode::Enter => self.show_selected_link().await,
                KeyCode::Tab | KeyCode::BackTab | KeyCode::Esc | KeyCode::Char('/') => self.focus_search().await,
                KeyCode::Char('h') | KeyCode::Char('H') => model.show_help_popup().await,
                KeyCode::Char('q') | KeyCode::Char('Q') => model.set_should_quit(true).await,
                _ => {}
            },
        }
        Ok(())
    }

    pub async fn handle_mouse_event(&self, mouse: MouseEvent) -> Result<()> {
        let position = Position::new(mouse.column, mouse.row);
        let layout = self.model.layout().await;

        match mouse.kind {
            MouseEventKind::ScrollDown => self.scroll_lines(WHEEL_STEP).await,
            MouseEventKind::ScrollUp => self.scroll_lines(-WHEEL_STEP).await,
            MouseEventKind::Moved => self.hover_pointer(mouse.column, mouse.row).await,
            MouseEventKind::Down(MouseButton::Left) => {
                if layout.back_to_top.contains(position) && self.back_to_top_visible().await {
                    self.scroll_to_top().await;
                } else if layout.search_button.contains(position) {
                    self.spawn_submit().await;
                } else if layout.search.contains(position) {
                    self.focus_search().await;
                } else if layout.results.contains(position) {
                    self.model.set_active_section(ActiveSection::Results).await;
                    self.hover_pointer(mouse.column, mouse.row).await;
                }
            }
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use crossterm::event::KeyEventState;
    use ratatui::layout::Rect;

    use super::*;
    use crate::animation::testing::RecordingTweener;
    use crate::animation::{FeedbackAnimator, Target};
    use crate::model::{Album, AppModel, Artist, CatalogApi, CatalogError, ScreenLayout, SearchOutcome, StatusLine};

    /// Catalog that only knows Daft Punk, with two albums
    struct OneArtistCatalog;

    #[async_trait]
    impl CatalogApi for OneArtistCatalog {
        async fn authenticate(&self) -> Result<(), CatalogError> {
            Ok(())
        }

        async fn has_token(&self) -> bool {
            true
        }

        async fn find_artist(&self, name: &str) -> Result<Option<Artist>, CatalogError> {
            if !name.eq_ignore_ascii_case("daft punk") {
                return Ok(None);
            }
            Ok(Some(Artist {
                id: "X".to_string(),
                name: "Daft Punk".to_string(),
                genres: vec![],
                followers: 0,
            }))
        }

        async fn artist_albums(&self, _artist_id: &str) -> Result<Vec<Album>, CatalogError> {
            Ok(vec![remote_album("discovery"), remote_album("homework")])
        }
    }

    fn remote_album(id: &str) -> Album {
        Album {
            id: id.to_string(),
            name: id.to_string(),
            release_date: "1997".to_string(),
            image_url: None,
            external_url: None,
        }
    }

    /// Wait for the background search to report back
    async fn settled_status(controller: &AppController) -> StatusLine {
        tokio::time::timeout(Duration::from_secs(1), async {
            loop {
                let status = controller.model.get_ui_state().await.status;
                if matches!(status, StatusLine::Outcome(_)) {
                    return status;
                }
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("search did not finish")
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn layout() -> ScreenLayout {
        ScreenLayout {
            search: Rect::new(0, 1, 50, 3),
            search_button: Rect::new(50, 1, 12, 3),
            results: Rect::new(0, 5, 60, 12),
            back_to_top: Rect::new(50, 15, 9, 3),
            ..ScreenLayout::default()
        }
    }

    async fn controller_with_albums(count: usize) -> (AppController, Arc<RecordingTweener>) {
        let tweener = Arc::new(RecordingTweener::default());
        let animator = Arc::new(FeedbackAnimator::new(tweener.clone(), 15));
        let model = Arc::new(AppModel::new());
        model.set_layout(layout()).await;
        let controller = AppController::new(model.clone(), Arc::new(OneArtistCatalog), animator, 15);
        if count == 0 {
            return (controller, tweener);
        }

        let seq = model.begin_search("Daft Punk").await;
        let albums = (0..count)
            .map(|n| Album {
                id: n.to_string(),
                name: format!("Album {}", n),
                release_date: "2001".to_string(),
                image_url: None,
                external_url: Some(format!("https://open.spotify.com/album/{}", n)),
            })
            .collect();
        let artist = Artist {
            id: "X".to_string(),
            name: "Daft Punk".to_string(),
            genres: vec![],
            followers: 0,
        };
        model
            .apply_search(seq, SearchOutcome::Populated { artist: "Daft Punk".into(), count }, Some((artist, albums)))
            .await;
        (controller, tweener)
    }

    #[tokio::test]
    async fn typing_edits_the_query() {
        let (controller, _) = controller_with_albums(0).await;
        for c in "dafx".chars() {
            controller.handle_key_event(key(KeyCode::Char(c))).await.unwrap();
        }
        controller.handle_key_event(key(KeyCode::Backspace)).await.unwrap();
        assert_eq!(controller.model.search_query().await, "daf");

        controller.handle_key_event(key(KeyCode::Esc)).await.unwrap();
        assert_eq!(controller.model.search_query().await, "");
    }

    #[tokio::test]
    async fn arrows_move_hover_between_cards() {
        let (controller, tweener) = controller_with_albums(4).await;
        assert_eq!(controller.model.get_ui_state().await.active_section, ActiveSection::Results);

        controller.handle_key_event(key(KeyCode::Right)).await.unwrap();
        controller.handle_key_event(key(KeyCode::Down)).await.unwrap();

        let content = controller.model.get_content_state().await;
        assert_eq!(content.selected, 3);
        let card_one: Vec<_> = tweener.calls_for(Target::Card(1)).iter().map(|(p, _)| p.scale).collect();
        assert_eq!(card_one, vec![Some(1.05), Some(1.0)]);
    }

    #[tokio::test]
    async fn wheel_scrolls_and_reveals_back_to_top() {
        let (controller, tweener) = controller_with_albums(20).await;

        for _ in 0..6 {
            controller.handle_mouse_event(mouse(MouseEventKind::ScrollDown, 10, 10)).await.unwrap();
        }
        assert_eq!(controller.model.scroll_position().await.0, 18);
        assert!(controller.back_to_top_visible().await);
        let shown = tweener.calls_for(Target::BackToTop);
        assert_eq!(shown.last().unwrap().0.opacity, Some(1.0));

        controller
            .handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 52, 16))
            .await
            .unwrap();
        assert_eq!(controller.model.scroll_position().await.0, 0);
        let hidden = tweener.calls_for(Target::BackToTop);
        assert_eq!(hidden.last().unwrap().0.opacity, Some(0.0));
    }

    #[tokio::test]
    async fn pointer_hover_follows_cards_and_leaves_the_grid() {
        let (controller, tweener) = controller_with_albums(4).await;

        controller.handle_mouse_event(mouse(MouseEventKind::Moved, 40, 6)).await.unwrap();
        assert_eq!(controller.model.get_content_state().await.hovered, Some(1));

        controller.handle_mouse_event(mouse(MouseEventKind::Moved, 40, 30)).await.unwrap();
        assert_eq!(controller.model.get_content_state().await.hovered, None);

        let scales: Vec<_> = tweener.calls_for(Target::Card(1)).iter().map(|(p, _)| p.scale).collect();
        assert_eq!(scales, vec![Some(1.05), Some(1.0)]);
    }

    #[tokio::test]
    async fn enter_on_a_card_shows_its_link() {
        let (controller, _) = controller_with_albums(2).await;
        controller.handle_key_event(key(KeyCode::Right)).await.unwrap();
        controller.handle_key_event(key(KeyCode::Enter)).await.unwrap();

        let status = controller.model.get_ui_state().await.status;
        assert_eq!(status, StatusLine::Note("Album 1: https://open.spotify.com/album/1".to_string()));
    }

    #[tokio::test]
    async fn error_overlay_blocks_input_until_dismissed() {
        let (controller, _) = controller_with_albums(0).await;
        controller.model.set_error("boom".to_string()).await;

        controller.handle_key_event(key(KeyCode::Char('x'))).await.unwrap();
        assert_eq!(controller.model.search_query().await, "");

        controller.handle_key_event(key(KeyCode::Esc)).await.unwrap();
        assert!(!controller.model.has_error().await);
    }

    #[tokio::test]
    async fn tab_toggles_focus_only_with_results() {
        let (empty, _) = controller_with_albums(0).await;
        empty.handle_key_event(key(KeyCode::Tab)).await.unwrap();
        assert_eq!(empty.model.get_ui_state().await.active_section, ActiveSection::Search);

        let (populated, _) = controller_with_albums(2).await;
        populated.handle_key_event(key(KeyCode::Tab)).await.unwrap();
        assert_eq!(populated.model.get_ui_state().await.active_section, ActiveSection::Search);
        populated.handle_key_event(key(KeyCode::Tab)).await.unwrap();
        assert_eq!(populated.model.get_ui_state().await.active_section, ActiveSection::Results);
    }

    #[tokio::test]
    async fn enter_searches_for_the_query_typed_so_far() {
        let (controller, _) = controller_with_albums(0).await;
        controller.set_query("Daft Punk").await;
        controller.handle_key_event(key(KeyCode::Enter)).await.unwrap();
        // Editing the box while the request is in flight does not change what was sent
        controller.set_query("Justice").await;

        let status = settled_status(&controller).await;

        assert_eq!(
            status,
            StatusLine::Outcome(SearchOutcome::Populated { artist: "Daft Punk".into(), count: 2 })
        );
        let content = controller.model.get_content_state().await;
        let ids: Vec<_> = content.albums.iter().map(|album| album.id.as_str()).collect();
        assert_eq!(ids, ["discovery", "homework"]);
        assert_eq!(controller.model.search_query().await, "Justice");
    }

    #[tokio::test]
    async fn search_button_submits_and_rejects_blank_queries() {
        let (controller, tweener) = controller_with_albums(0).await;
        let click = mouse(MouseEventKind::Down(MouseButton::Left), 55, 2);

        controller.set_query("   ").await;
        controller.handle_mouse_event(click).await.unwrap();
        assert_eq!(
            controller.model.get_ui_state().await.status,
            StatusLine::Outcome(SearchOutcome::EmptyQuery)
        );
        assert_eq!(tweener.shakes(), 1);

        controller.set_query("daft punk").await;
        controller.handle_mouse_event(click).await.unwrap();
        assert_eq!(
            controller.model.get_ui_state().await.status,
            StatusLine::Searching { query: "daft punk".into() }
        );
        let status = settled_status(&controller).await;
        assert!(matches!(status, StatusLine::Outcome(SearchOutcome::Populated { count: 2, .. })));
        assert_eq!(tweener.shakes(), 1);
    }
}
