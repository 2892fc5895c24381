//! Selection invariant: selected cards are face up and unmatched.

use super::Invariant;
use crate::contracts::SelectionsFaceUp;
use crate::{CardFace, MemoryGame, Phase};

/// Invariant: each phase shows exactly the faces it should.
///
/// - Preview: every card face up.
/// - Playing: the unmatched face-up cards are exactly the turn's selections.
/// - Won: every card matched.
pub struct SelectionsFaceUpInvariant;

impl Invariant<MemoryGame> for SelectionsFaceUpInvariant {
    fn holds(game: &MemoryGame) -> bool {
        match game.phase() {
            Phase::Idle => true,
            Phase::Preview(preview) => preview
                .table()
                .deck()
                .cards()
                .iter()
                .all(|card| card.face() == CardFace::Up),
            Phase::Playing(playing) => {
                SelectionsFaceUp::holds(playing.table().deck(), playing.turn())
            }
            Phase::Won(won) => won.table().deck().all_matched(),
        }
    }

    fn description() -> &'static str {
        "Face-up cards are exactly the current selections"
    }
}
