//! Pantry Detective: The Case of the Missing Scones
//!
//! A cozy terminal detective game. Gogo's famous scones have vanished from
//! the pantry on the morning of the family gathering, and it falls to you
//! to read the case notes, follow the clues, question the family, and name
//! the culprit.
//!
//! # Game Mechanics
//!
//! - **Case file**: The narrative and clue sheet load from plain text files
//! - **Interrogation**: Each suspect answers a fixed set of opening questions
//! - **Progress**: Who has been questioned is remembered in a local database
//! - **Accusation**: One name decides the case - choose wisely
//!
//! # Architecture
//!
//! - `game` - Core game logic: the session, the dialogue model, the case
//! - `tui` - Terminal user interface with ratatui
//! - `data` - Clues, file readers, and the SQLite progress store

pub mod data;
pub mod game;
pub mod tui;

pub use data::*;
pub use game::GameSession;

/// Game version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type for the game
pub type Result<T> = anyhow::Result<T>;
