//! Read-only views handed to renderers.

use crate::{Card, CardId, GameMode, GameStatus, Generation, Symbol};
use serde::{Deserialize, Serialize};

/// Formats seconds as `M:SS` (minutes unpadded, seconds zero-padded).
pub fn format_time(total_seconds: u32) -> String {
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// One card as a renderer sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardView {
    /// Stable id; send it back in click intents.
    pub id: CardId,
    /// Symbol on the face.
    pub content: Symbol,
    /// Face showing.
    pub is_flipped: bool,
    /// Paired.
    pub is_matched: bool,
}

impl From<&Card> for CardView {
    fn from(card: &Card) -> Self {
        Self {
            id: card.id(),
            content: card.symbol(),
            is_flipped: card.is_flipped(),
            is_matched: card.is_matched(),
        }
    }
}

/// Final stats of a won game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[display("You won in {} moves ({})", moves, format_time(*time_elapsed))]
pub struct WinSummary {
    moves: u32,
    time_elapsed: u32,
}

impl WinSummary {
    /// Creates a summary.
    pub fn new(moves: u32, time_elapsed: u32) -> Self {
        Self {
            moves,
            time_elapsed,
        }
    }

    /// Completed turns.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Seconds played.
    pub fn time_elapsed(&self) -> u32 {
        self.time_elapsed
    }
}

/// Everything a renderer needs after a transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Cards in table order; empty while idle.
    pub cards: Vec<CardView>,
    /// Completed turns.
    pub moves: u32,
    /// Seconds played.
    pub time_elapsed: u32,
    /// Current phase.
    pub status: GameStatus,
    /// Mode of the current game.
    pub mode: GameMode,
    /// Seconds left in the preview; zero outside it.
    pub preview_countdown: u32,
    /// Game the snapshot belongs to.
    pub generation: Generation,
    /// Bumped on every transition.
    pub version: u64,
}

impl GameSnapshot {
    /// True when card clicks can be accepted.
    pub fn accepts_clicks(&self) -> bool {
        self.status == GameStatus::Playing
    }

    /// Elapsed time as `M:SS`.
    pub fn formatted_time(&self) -> String {
        format_time(self.time_elapsed)
    }

    /// Final stats, once won.
    pub fn win_summary(&self) -> Option<WinSummary> {
        (self.status == GameStatus::Won).then(|| WinSummary::new(self.moves, self.time_elapsed))
    }

    /// One-line prompt for the header.
    pub fn status_line(&self) -> String {
        match self.status {
            GameStatus::Preview => format!("Memorize! {}s", self.preview_countdown),
            GameStatus::Won => self
                .win_summary()
                .map(|summary| summary.to_string())
                .unwrap_or_default(),
            GameStatus::Idle | GameStatus::Playing => "Find matches".to_string(),
        }
    }

    /// Number of matched cards.
    pub fn matched(&self) -> usize {
        self.cards.iter().filter(|card| card.is_matched).count()
    }
}
