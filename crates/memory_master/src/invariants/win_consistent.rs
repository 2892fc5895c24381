//! Win invariant: the game is won iff every card is matched.

use super::Invariant;
use crate::{GameStatus, MemoryGame};

/// Invariant: status is `Won` exactly when the deck is non-empty and fully
/// matched.
pub struct WinConsistentInvariant;

impl Invariant<MemoryGame> for WinConsistentInvariant {
    fn holds(game: &MemoryGame) -> bool {
        let all_matched = game.deck().is_some_and(|deck| deck.all_matched());
        (game.status() == GameStatus::Won) == all_matched
    }

    fn description() -> &'static str {
        "Game is won iff every card is matched"
    }
}
