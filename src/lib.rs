//! # Connect Four
//!
//! Rules engine for two-player Connect Four on any board of at least 4x4,
//! with a terminal UI and a line-mode text front end built on top of it.
//!
//! ## Modules
//!
//! - [`game`]: board, players, and the engine state machine
//! - [`ui`]: Terminal UI and text harness bound to board snapshots
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod ui;
