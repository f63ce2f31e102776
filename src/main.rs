mod animation;
mod auth;
mod config;
mod controller;
mod logging;
mod model;
mod view;

use std::io;
use std::sync::Arc;
use anyhow::Result;
use std::time::Duration;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};

use animation::{FeedbackAnimator, TweenEngine};
use config::AppConfig;
use controller::AppController;
use model::AppModel;
use view::AppView;

/// Roughly 60 frames a second while something is moving
const FRAME_POLL: Duration = Duration::from_millis(16);
const IDLE_POLL: Duration = Duration::from_millis(50);

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = logging::init_logging() {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!("=== Discography Starting ===");

    let config = AppConfig::load()?;

    // Step 1: catalog client with the client-credentials grant
    let spotify_client = auth::build_catalog(&config.catalog)?;

    // Step 2: animation engine and the cues driven through it
    let engine = Arc::new(TweenEngine::new());
    let animator = Arc::new(FeedbackAnimator::new(engine.clone(), config.ui.back_to_top_threshold));

    let model = Arc::new(AppModel::new());
    let controller = AppController::new(
        model.clone(),
        spotify_client.clone(),
        animator.clone(),
        config.ui.back_to_top_threshold,
    );

    // Step 3: token up front; a failure shows the error overlay and the next search retries
    controller.authenticate().await;
    auth::report_token_expiry(&spotify_client).await;
    animator.draw_logo();

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, model, controller, engine).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("Discography shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: Arc<AppModel>,
    controller: AppController,
    engine: Arc<TweenEngine>,
) -> Result<()> {
    let mut last_screen = None;

    loop {
        // Auto-clear old errors (after 5 seconds)
        model.auto_clear_old_errors().await;
        engine.prune();

        let size = terminal.size()?;
        let screen = AppView::layout(Rect::new(0, 0, size.width, size.height));
        if last_screen != Some(screen) {
            // A resize changes the column count and with it the scrollable range
            model.set_layout(screen).await;
            controller.sync_scroll().await;
            last_screen = Some(screen);
        }

        let (ui_state, content_state, should_quit) = (
            model.get_ui_state().await,
            model.get_content_state().await,
            model.should_quit().await,
        );

        if should_quit {
            break;
        }

        terminal.draw(|f| {
            AppView::render(f, &screen, &ui_state, &content_state, &engine);
        })?;

        let poll = if engine.is_animating() { FRAME_POLL } else { IDLE_POLL };
        if event::poll(poll)? {
            match event::read()? {
                Event::Key(key) => controller.handle_key_event(key).await?,
                Event::Mouse(mouse) => controller.handle_mouse_event(mouse).await?,
                _ => {}
            }
        }
    }

    Ok(())
}
