//! Data structures and storage for the game
//!
//! Defines clues, the file-backed case content, and the progress store.

pub mod clue;
pub mod files;
pub mod store;

pub use clue::*;
pub use store::*;

use serde::{Deserialize, Serialize};

/// Difficulty of the loaded case.
///
/// Selected when a case opens and shown in the header. No game rule reads
/// it yet; the shipped case plays the same at every level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaseDifficulty {
    Easy,
    Medium,
    Hard,
}

impl CaseDifficulty {
    pub fn description(&self) -> &'static str {
        match self {
            CaseDifficulty::Easy => "A gentle afternoon. Take your time with the family.",
            CaseDifficulty::Medium => "The standard case. Scones wait for no one.",
            CaseDifficulty::Hard => "For seasoned sleuths. No one makes it easy for you.",
        }
    }
}

impl Default for CaseDifficulty {
    fn default() -> Self {
        CaseDifficulty::Medium
    }
}

impl std::fmt::Display for CaseDifficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CaseDifficulty::Easy => write!(f, "Easy"),
            CaseDifficulty::Medium => write!(f, "Medium"),
            CaseDifficulty::Hard => write!(f, "Hard"),
        }
    }
}
