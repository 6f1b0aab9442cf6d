//! Application state and logic.

use super::input::Action;
use connect_k::{
    Column, Game, GameStatus, OpponentKind, Outcome, Projection, SessionError, SessionErrorKind,
    SessionId, SessionManager, Settings,
};
use derive_getters::Getters;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Main application state.
#[derive(Debug, Getters)]
pub struct App {
    #[getter(skip)]
    sessions: SessionManager,
    session_id: SessionId,
    settings: Settings,
    cursor: Column,
    status_message: String,
    should_quit: bool,
}

impl App {
    /// Creates the application with a fresh game session.
    #[instrument(skip(settings))]
    pub fn new(settings: Settings) -> Result<Self, SessionError> {
        let sessions = SessionManager::new();
        let session_id = sessions.create(settings.game_config())?;
        let mut app = Self {
            sessions,
            session_id,
            settings,
            cursor: 0,
            status_message: String::new(),
            should_quit: false,
        };
        let game = app.game()?;
        app.refresh_status(&game);
        Ok(app)
    }

    /// Loads the current game snapshot.
    pub fn game(&self) -> Result<Game, SessionError> {
        self.sessions.load(&self.session_id)
    }

    /// Viewport onto `game`.
    pub fn projection(&self, game: &Game) -> Projection {
        let display = self.settings.display();
        game.projection(*display.height(), *display.width())
    }

    /// Pause before the computer replies.
    pub fn computer_delay(&self) -> Duration {
        Duration::from_millis(*self.settings.computer_delay_ms())
    }

    /// Handles a player action.
    #[instrument(skip(self))]
    pub fn apply(&mut self, action: Action) -> Result<(), SessionError> {
        match action {
            Action::Left => self.move_cursor(-1),
            Action::Right => self.move_cursor(1),
            Action::Play => self.play(),
            Action::Undo => self.undo(),
            Action::Hint => self.hint(),
            Action::Restart => self.restart(),
            Action::Quit => {
                info!("User quit");
                self.should_quit = true;
                Ok(())
            }
        }
    }

    /// Lets the computer move and refreshes the view.
    #[instrument(skip(self))]
    pub fn computer_turn(&mut self) -> Result<(), SessionError> {
        if let Some(column) = self.sessions.computer_move(&self.session_id)? {
            debug!(column, "Computer played");
        }
        self.after_move()
    }

    fn move_cursor(&mut self, delta: Column) -> Result<(), SessionError> {
        let game = self.game()?;
        let columns = self.projection(&game).columns();
        self.cursor = self
            .cursor
            .saturating_add(delta)
            .clamp(*columns.start(), *columns.end());
        Ok(())
    }

    fn play(&mut self) -> Result<(), SessionError> {
        match self.sessions.human_move(&self.session_id, self.cursor) {
            Ok(_) => self.after_move(),
            Err(e) if recoverable(&e) => {
                debug!(error = %e, "Move refused");
                self.status_message = e.message;
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    fn undo(&mut self) -> Result<(), SessionError> {
        let undone = self.sessions.undo(&self.session_id)?;
        debug!(?undone, "Undo");
        self.after_move()
    }

    fn hint(&mut self) -> Result<(), SessionError> {
        let mut game = self.game()?;
        if game.is_over() {
            return Ok(());
        }
        let column = game.hint();
        let columns = self.projection(&game).columns();
        self.cursor = column.clamp(*columns.start(), *columns.end());
        self.status_message = format!("Hint: play column {}", column);
        Ok(())
    }

    fn restart(&mut self) -> Result<(), SessionError> {
        info!("Restarting game");
        self.sessions.reset(&self.session_id)?;
        self.sessions
            .configure(&self.session_id, self.settings.game_config())?;
        self.after_move()
    }

    /// Recenters the cursor on the last move and updates the message.
    fn after_move(&mut self) -> Result<(), SessionError> {
        let game = self.game()?;
        self.cursor = game.engine().last_move().unwrap_or(0);
        self.refresh_status(&game);
        Ok(())
    }

    fn refresh_status(&mut self, game: &Game) {
        self.status_message = status_line(game);
    }
}

fn recoverable(error: &SessionError) -> bool {
    matches!(
        error.kind,
        SessionErrorKind::GameOver | SessionErrorKind::NotYourTurn | SessionErrorKind::NotStarted
    )
}

/// Message shown under the board.
pub fn status_line(game: &Game) -> String {
    let Some(config) = game.config() else {
        return "Waiting for game to start...".to_string();
    };
    match game.status() {
        GameStatus::Over(Outcome::Draw) => "It's a draw!".to_string(),
        GameStatus::Over(Outcome::Winner(mark)) => {
            let who = if mark == config.computer() {
                match config.opponent() {
                    OpponentKind::Computer => "Computer",
                    OpponentKind::Human => "Human",
                }
            } else {
                "Human"
            };
            format!("Player {} ({}) is the winner!", mark.symbol(), who)
        }
        GameStatus::InProgress if game.is_computer_turn() => "Computer is thinking...".to_string(),
        _ => format!("Player {}, it's your turn", game.to_move().symbol()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use connect_k::Mark;

    fn computer_settings() -> Settings {
        Settings::default()
            .with_overrides(Some(3), Some(Mark::Red), Some(Mark::Red), Some(OpponentKind::Computer))
            .unwrap()
    }

    #[test]
    fn test_new_app_is_humans_turn() {
        let app = App::new(computer_settings()).unwrap();
        assert_eq!(app.status_message(), "Player R, it's your turn");
        assert_eq!(*app.cursor(), 0);
    }

    #[test]
    fn test_play_then_computer_reply() {
        let mut app = App::new(computer_settings()).unwrap();
        app.apply(Action::Play).unwrap();
        assert_eq!(app.status_message(), "Computer is thinking...");
        app.computer_turn().unwrap();
        let game = app.game().unwrap();
        assert_eq!(game.engine().history().len(), 2);
        assert_eq!(game.to_move(), Mark::Red);
    }

    #[test]
    fn test_out_of_turn_play_is_a_message() {
        let mut app = App::new(computer_settings()).unwrap();
        app.apply(Action::Play).unwrap();
        app.apply(Action::Play).unwrap();
        assert!(app.status_message().contains("Waiting for the computer"));
    }

    #[test]
    fn test_cursor_stays_in_view() {
        let mut app = App::new(Settings::default()).unwrap();
        for _ in 0..100 {
            app.apply(Action::Left).unwrap();
        }
        assert_eq!(*app.cursor(), -8);
    }

    #[test]
    fn test_restart_clears_board() {
        let mut app = App::new(Settings::default()).unwrap();
        app.apply(Action::Play).unwrap();
        app.apply(Action::Restart).unwrap();
        let game = app.game().unwrap();
        assert!(game.engine().board().is_empty());
        assert_eq!(game.status(), GameStatus::InProgress);
    }
}
