//! Contract-based validation for turn transitions.
//!
//! Contracts define correctness through preconditions and postconditions:
//! {P(state, action)} transition {Q(before, after)}. Preconditions gate
//! player intents; postconditions are checked in debug builds only.

use crate::invariants::InvariantViolation;
use crate::{CardFace, CardId, ClickRejected, Deck, GamePlaying, PendingResolution, ResolveError, Turn};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// Preconditions and postconditions for a state transition.
pub trait Contract<S, A> {
    /// Why an action was refused.
    type Rejection;

    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), Self::Rejection>;

    /// Checks that the transition preserved the system's guarantees.
    fn post(before: &S, after: &S) -> Result<(), Vec<InvariantViolation>>;
}

/// Logs postcondition failures and trips a debug assertion.
#[cfg_attr(not(debug_assertions), allow(dead_code))]
pub(crate) fn enforce(result: Result<(), Vec<InvariantViolation>>, transition: &'static str) {
    if let Err(violations) = result {
        for violation in &violations {
            warn!(transition, violation = %violation.description, "Postcondition failed");
        }
        debug_assert!(
            violations.is_empty(),
            "{transition} broke postconditions: {violations:?}"
        );
    }
}

// ─────────────────────────────────────────────────────────────
//  Shared checks
// ─────────────────────────────────────────────────────────────

/// Matched cards never change.
pub struct MatchedCardsStable;

impl MatchedCardsStable {
    /// True when every card matched in `before` is still matched in `after`.
    pub fn holds(before: &Deck, after: &Deck) -> bool {
        before.len() == after.len()
            && before
                .cards()
                .iter()
                .filter(|card| card.is_matched())
                .all(|card| after.get(card.id()).is_some_and(|c| c.is_matched()))
    }
}

/// While playing, the unmatched face-up cards are exactly the turn's selections.
pub struct SelectionsFaceUp;

impl SelectionsFaceUp {
    /// Checks `deck` against `turn`.
    pub fn holds(deck: &Deck, turn: &Turn) -> bool {
        let selected: Vec<CardId> = turn.first().into_iter().chain(turn.second()).collect();
        let face_up: Vec<CardId> = deck
            .cards()
            .iter()
            .filter(|card| card.face() == CardFace::Up)
            .map(|card| card.id())
            .collect();
        let mut sorted = selected.clone();
        sorted.sort_unstable();
        sorted.dedup();
        sorted.len() == selected.len() && sorted == face_up
    }
}

fn violation_if(failed: bool, description: &str, violations: &mut Vec<InvariantViolation>) {
    if failed {
        violations.push(InvariantViolation::new(description));
    }
}

fn into_result(violations: Vec<InvariantViolation>) -> Result<(), Vec<InvariantViolation>> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

// ─────────────────────────────────────────────────────────────
//  Click Contract
// ─────────────────────────────────────────────────────────────

/// Contract for card clicks.
///
/// Preconditions:
/// - The card is on the table
/// - No turn is resolving
/// - The card is face down (not matched, not already up)
///
/// Postconditions:
/// - Exactly one card turned face up
/// - Matched cards unchanged
/// - Moves grew by one iff the click completed a turn
/// - Face-up cards are exactly the selections
pub struct ClickContract;

impl Contract<GamePlaying, CardId> for ClickContract {
    type Rejection = ClickRejected;

    #[instrument(skip(game))]
    fn pre(game: &GamePlaying, id: &CardId) -> Result<(), ClickRejected> {
        if game.turn().is_processing() {
            return Err(ClickRejected::Processing);
        }
        let card = game
            .table()
            .deck()
            .get(*id)
            .ok_or(ClickRejected::UnknownCard(*id))?;
        if card.is_matched() {
            return Err(ClickRejected::AlreadyMatched(*id));
        }
        if card.is_flipped() {
            return Err(ClickRejected::AlreadyFlipped(*id));
        }
        Ok(())
    }

    fn post(before: &GamePlaying, after: &GamePlaying) -> Result<(), Vec<InvariantViolation>> {
        let (old, new) = (before.table().deck(), after.table().deck());
        let mut violations = Vec::new();

        let turned_up = old
            .cards()
            .iter()
            .zip(new.cards())
            .filter(|(a, b)| !a.is_flipped() && b.is_flipped())
            .count();
        violation_if(turned_up != 1, "A click turns exactly one card face up", &mut violations);
        violation_if(
            !MatchedCardsStable::holds(old, new),
            "Matched cards never change",
            &mut violations,
        );
        let expected_moves = before.table().moves() + u32::from(after.turn().is_processing());
        violation_if(
            after.table().moves() != expected_moves,
            "Moves count completed turns only",
            &mut violations,
        );
        violation_if(
            !SelectionsFaceUp::holds(new, after.turn()),
            "Face-up cards are exactly the selections",
            &mut violations,
        );

        into_result(violations)
    }
}

// ─────────────────────────────────────────────────────────────
//  Resolve Contract
// ─────────────────────────────────────────────────────────────

/// Contract for applying a delayed turn outcome.
///
/// Preconditions:
/// - The resolution belongs to the current game
/// - It is the turn currently holding the processing lock
///
/// Postconditions:
/// - The turn is open again
/// - Moves unchanged
/// - Matched cards unchanged
/// - No face-up unmatched cards remain
pub struct ResolveContract;

impl Contract<GamePlaying, PendingResolution> for ResolveContract {
    type Rejection = ResolveError;

    #[instrument(skip(game, pending))]
    fn pre(game: &GamePlaying, pending: &PendingResolution) -> Result<(), ResolveError> {
        let expected = game.table().generation();
        if pending.generation() != expected {
            return Err(ResolveError::StaleGeneration {
                expected,
                found: pending.generation(),
            });
        }
        match game.turn() {
            Turn::Resolving(current) if current == pending => Ok(()),
            Turn::Resolving(_) => Err(ResolveError::UnexpectedTurn(pending.outcome())),
            Turn::Open | Turn::FirstPicked(_) => Err(ResolveError::NoPendingTurn),
        }
    }

    fn post(before: &GamePlaying, after: &GamePlaying) -> Result<(), Vec<InvariantViolation>> {
        let (old, new) = (before.table().deck(), after.table().deck());
        let mut violations = Vec::new();

        violation_if(
            *after.turn() != Turn::Open,
            "Resolution reopens the turn",
            &mut violations,
        );
        violation_if(
            before.table().moves() != after.table().moves(),
            "Resolution does not count a move",
            &mut violations,
        );
        violation_if(
            !MatchedCardsStable::holds(old, new),
            "Matched cards never change",
            &mut violations,
        );
        violation_if(
            !SelectionsFaceUp::holds(new, after.turn()),
            "Face-up cards are exactly the selections",
            &mut violations,
        );

        into_result(violations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Generation, Symbol, Table, Timings, TurnOutcome};

    fn playing() -> GamePlaying {
        let deck = Deck::from_symbols([Symbol::Frog, Symbol::Koala, Symbol::Frog, Symbol::Koala]);
        GamePlaying::begin(Table::deal(deck, Generation::default(), Timings::default()))
    }

    #[test]
    fn test_precondition_accepts_face_down_card() {
        assert!(ClickContract::pre(&playing(), &CardId::new(0)).is_ok());
    }

    #[test]
    fn test_precondition_rejects_unknown_card() {
        assert_eq!(
            ClickContract::pre(&playing(), &CardId::new(40)),
            Err(ClickRejected::UnknownCard(CardId::new(40)))
        );
    }

    #[test]
    fn test_precondition_rejects_face_up_card() {
        let mut game = playing();
        game.click(CardId::new(0)).unwrap();
        assert_eq!(
            ClickContract::pre(&game, &CardId::new(0)),
            Err(ClickRejected::AlreadyFlipped(CardId::new(0)))
        );
    }

    #[test]
    fn test_postcondition_holds_after_click() {
        let before = playing();
        let mut after = before.clone();
        after.click(CardId::new(1)).unwrap();
        assert!(ClickContract::post(&before, &after).is_ok());
    }

    #[test]
    fn test_postcondition_detects_stray_face_up_card() {
        let before = playing();
        let mut after = before.clone();
        after.click(CardId::new(1)).unwrap();
        after.table.deck.turn_up(CardId::new(2));
        assert!(ClickContract::post(&before, &after).is_err());
    }

    #[test]
    fn test_resolve_precondition_rejects_stale_generation() {
        let mut game = playing();
        game.click(CardId::new(0)).unwrap();
        let pending = game.click(CardId::new(2)).unwrap().pending().unwrap();
        game.table.generation = game.table.generation.next();
        assert!(matches!(
            ResolveContract::pre(&game, &pending),
            Err(ResolveError::StaleGeneration { .. })
        ));
    }

    #[test]
    fn test_resolve_precondition_rejects_other_pair() {
        let mut game = playing();
        game.click(CardId::new(0)).unwrap();
        let pending = game.click(CardId::new(2)).unwrap().pending().unwrap();

        let deck = game.table().deck();
        let other = PendingResolution::judge(
            game.table().generation(),
            deck.get(CardId::new(1)).unwrap(),
            deck.get(CardId::new(3)).unwrap(),
            game.table().timings(),
        );
        assert_eq!(
            ResolveContract::pre(&game, &other),
            Err(ResolveError::UnexpectedTurn(TurnOutcome::Match {
                symbol: Symbol::Koala
            }))
        );

        let before = game.clone();
        assert!(game.resolve(&other).is_err());
        assert_eq!(game, before);
        assert_eq!(game.turn().pending(), Some(&pending));
    }

    #[test]
    fn test_matched_cards_stable_detects_unmatching() {
        let mut before = Deck::from_symbols([Symbol::Frog, Symbol::Frog]);
        before.mark_matched(Symbol::Frog);
        let after = Deck::from_symbols([Symbol::Frog, Symbol::Frog]);
        assert!(!MatchedCardsStable::holds(&before, &after));
        assert!(MatchedCardsStable::holds(&after, &before));
    }
}
