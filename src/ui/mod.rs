//! Presentation adapters over the engine: a ratatui terminal UI and a plain
//! line-oriented text harness.

mod app;
mod game_view;
pub mod text;

pub use app::{status_line, App};
pub use text::TextHarness;
