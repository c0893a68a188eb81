use std::fmt;

use tracing::{debug, info};

use super::board::{Board, BoardDimensions};
use super::player::Player;
use crate::error::{ConfigError, MoveError};

/// Read-only copy of the grid handed to presentation code. Changing a
/// snapshot never affects the engine it came from.
pub type BoardSnapshot = Board;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameOutcome {
    InProgress,
    Win(Player),
    Draw,
}

impl GameOutcome {
    /// Win or Draw; no further moves are accepted until reset.
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameOutcome::InProgress)
    }

    pub fn winner(self) -> Option<Player> {
        match self {
            GameOutcome::Win(player) => Some(player),
            _ => None,
        }
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOutcome::InProgress => f.write_str("In Progress"),
            GameOutcome::Win(player) => write!(f, "{player} Wins!"),
            GameOutcome::Draw => f.write_str("Draw!"),
        }
    }
}

/// Result of an accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveResult {
    pub row: usize,
    pub col: usize,
    pub outcome: GameOutcome,
    /// Player to move next. Stays on the mover once the game is over.
    pub next_player: Player,
}

/// Owns the board, the turn and the outcome of one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameEngine {
    board: Board,
    active_player: Player,
    outcome: GameOutcome,
    move_count: usize,
    last_move: Option<(usize, usize)>,
}

impl GameEngine {
    /// Fresh game on an empty board, PlayerOne to move
    pub fn new(dims: BoardDimensions) -> Self {
        GameEngine {
            board: Board::new(dims),
            active_player: Player::PlayerOne,
            outcome: GameOutcome::InProgress,
            move_count: 0,
            last_move: None,
        }
    }

    /// Fresh 6x7 game
    pub fn standard() -> Self {
        Self::new(BoardDimensions::STANDARD)
    }

    pub fn with_dimensions(rows: usize, cols: usize) -> Result<Self, ConfigError> {
        Ok(Self::new(BoardDimensions::new(rows, cols)?))
    }

    pub fn dimensions(&self) -> BoardDimensions {
        self.board.dimensions()
    }

    /// Borrowed view of the board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Owned copy of the board
    pub fn snapshot(&self) -> BoardSnapshot {
        self.board.clone()
    }

    pub fn outcome(&self) -> GameOutcome {
        self.outcome
    }

    /// Player to move. Only meaningful while the game is in progress.
    pub fn active_player(&self) -> Player {
        self.active_player
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome.is_terminal()
    }

    /// Number of accepted moves since the last reset
    pub fn move_count(&self) -> usize {
        self.move_count
    }

    /// (row, col) filled by the most recent accepted move
    pub fn last_move(&self) -> Option<(usize, usize)> {
        self.last_move
    }

    /// Columns that currently accept a move. Empty once the game is over.
    pub fn legal_columns(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.board.legal_columns()
    }

    /// Drop the active player's disc into `col`.
    ///
    /// The win check runs before the draw check, so filling the last cell
    /// with a 4-in-a-row reports `Win`. On error the engine is unchanged.
    pub fn apply_move(&mut self, col: usize) -> Result<MoveResult, MoveError> {
        if self.is_terminal() {
            debug!(col, outcome = %self.outcome, "move rejected: game over");
            return Err(MoveError::GameOver(self.outcome));
        }

        let mover = self.active_player;
        let row = self
            .board
            .drop_disc(col, mover.to_cell())
            .inspect_err(|e| debug!(col, error = %e, "move rejected"))?;
        self.move_count += 1;
        self.last_move = Some((row, col));
        debug!(player = %mover, row, col, moves = self.move_count, "disc dropped");

        if self.check_win(mover) {
            self.outcome = GameOutcome::Win(mover);
        } else if self.check_draw() {
            self.outcome = GameOutcome::Draw;
        } else {
            self.active_player = mover.other();
        }

        if self.is_terminal() {
            info!(outcome = %self.outcome, moves = self.move_count, "game over");
        }

        Ok(MoveResult {
            row,
            col,
            outcome: self.outcome,
            next_player: self.active_player,
        })
    }

    /// True if `player` has four in a row anywhere on the board
    pub fn check_win(&self, player: Player) -> bool {
        self.board.check_win(player)
    }

    /// True if no cell is empty. Only meaningful after ruling out a win.
    pub fn check_draw(&self) -> bool {
        self.board.is_full()
    }

    /// Discard the current game and start over on an empty board of the
    /// same size.
    pub fn reset(&mut self) -> BoardSnapshot {
        *self = Self::new(self.dimensions());
        info!(
            rows = self.board.rows(),
            cols = self.board.cols(),
            "game reset"
        );
        self.snapshot()
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::standard()
    }
}
