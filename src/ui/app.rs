use crate::config::AppConfig;
use crate::error::MoveError;
use crate::game::{GameEngine, GameOutcome};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use std::io;
use std::time::Duration;
use tracing::debug;

pub struct App {
    engine: GameEngine,
    selected_column: usize,
    start_column: usize,
    poll_interval: Duration,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    pub fn new(engine: GameEngine, config: &AppConfig) -> Self {
        let start_column = config.start_column().min(engine.board().cols() - 1);
        App {
            engine,
            selected_column: start_column,
            start_column,
            poll_interval: Duration::from_millis(config.ui.poll_interval_ms),
            should_quit: false,
            message: None,
        }
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn selected_column(&self) -> usize {
        self.selected_column
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        B::Error: Into<io::Error>,
    {
        loop {
            terminal.draw(|f| self.render(f)).map_err(Into::into)?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(self.poll_interval)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Clear message on any key press
        self.message = None;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column + 1 < self.engine.board().cols() {
                    self.selected_column += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_disc();
            }
            KeyCode::Char('r') => {
                self.engine.reset();
                self.selected_column = self.start_column;
                self.message = Some("New game started!".to_string());
            }
            _ => {}
        }
    }

    /// Drop disc in selected column
    fn drop_disc(&mut self) {
        if self.engine.is_terminal() {
            self.message = Some("Game over! Press 'r' to restart.".to_string());
            return;
        }

        match self.engine.apply_move(self.selected_column) {
            Ok(result) => {
                debug!(row = result.row, col = result.col, "tui move applied");
                if result.outcome.is_terminal() {
                    self.message = Some(result.outcome.to_string());
                }
            }
            Err(MoveError::ColumnFull(_)) => {
                self.message = Some("Column is full!".to_string());
            }
            Err(MoveError::InvalidColumn { .. }) => {
                self.message = Some("Invalid column!".to_string());
            }
            Err(MoveError::GameOver(_)) => {
                self.message = Some("Game is over!".to_string());
            }
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(frame, &self.engine, self.selected_column, &self.message);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(GameEngine::standard(), &AppConfig::default())
    }
}

/// Text for the header line: whose turn it is, or the final outcome.
pub fn status_line(engine: &GameEngine) -> String {
    match engine.outcome() {
        GameOutcome::InProgress => format!("{}'s Turn", engine.active_player()),
        outcome => format!("Game Over  |  {outcome}"),
    }
}
