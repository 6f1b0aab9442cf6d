//! Terminal UI for connect_k

mod app;
mod input;
mod ui;

use anyhow::Result;
use connect_k::Settings;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use std::io;
use std::time::Duration;
use tracing::{debug, error, info, instrument};

use app::App;

/// Run the terminal game
pub fn run_tui(settings: Settings) -> Result<()> {
    // Setup logging to file to avoid interfering with TUI
    let log_file = std::fs::File::create("connect_k_tui.log")?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,connect_k=debug")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized

    info!(k = settings.k(), opponent = %settings.opponent(), "Starting connect_k TUI");

    let mut app = App::new(settings)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_game(&mut terminal, &mut app);

    // Restore terminal, even on error
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }

    res
}

/// Draw, let the computer move when it is its turn, otherwise wait for keys.
#[instrument(skip_all, fields(session_id = %app.session_id()))]
fn run_game<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    <B as Backend>::Error: Send + Sync + 'static,
{
    info!("Starting game loop");

    loop {
        let game = app.game()?;
        let projection = app.projection(&game);
        terminal.draw(|frame| {
            ui::draw(frame, &game, &projection, *app.cursor(), app.status_message())
        })?;

        if *app.should_quit() {
            return Ok(());
        }

        if game.is_computer_turn() && !game.is_over() {
            debug!("Computer to move");
            std::thread::sleep(app.computer_delay());
            app.computer_turn()?;
            continue;
        }

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && let Some(action) = input::action_for(key.code)
        {
            app.apply(action)?;
        }
    }
}
