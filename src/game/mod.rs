//! Core Connect Four rules: board, players, and the game engine that owns
//! turn and outcome state.

mod board;
mod engine;
mod player;

pub use board::{Board, BoardDimensions, Cell, COLS, CONNECT, MIN_DIMENSION, ROWS};
pub use engine::{BoardSnapshot, GameEngine, GameOutcome, MoveResult};
pub use player::Player;
