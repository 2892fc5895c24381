//! Game modes and statuses.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// How a game begins.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum GameMode {
    /// Cards start face down and play begins immediately.
    #[default]
    Classic,
    /// All faces are shown for a short countdown before play begins.
    Remember,
}

/// Coarse phase of the current game, as seen by a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum GameStatus {
    /// No game has been started.
    Idle,
    /// Remember mode countdown with every face showing.
    Preview,
    /// Accepting clicks; the clock is running.
    Playing,
    /// Every pair matched.
    Won,
}

impl GameStatus {
    /// True while a periodic timer drives the phase.
    pub fn is_timed(self) -> bool {
        matches!(self, GameStatus::Preview | GameStatus::Playing)
    }
}
