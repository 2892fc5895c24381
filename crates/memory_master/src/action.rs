//! Outcomes and rejections of player intents.
//!
//! Rejections are not failures from the player's point of view: an
//! ignored click simply does nothing. They are typed so that callers can
//! log them and tests can assert on the reason.

use crate::{CardId, GameStatus, Generation, PendingResolution, TurnOutcome};

/// Result of an accepted click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The card became the first selection of a new turn.
    FirstSelected(CardId),
    /// The card completed a turn. Call back with the resolution once its
    /// delay has elapsed.
    SecondSelected(PendingResolution),
}

impl ClickOutcome {
    /// The deferred resolution, if this click completed a turn.
    pub fn pending(&self) -> Option<PendingResolution> {
        match self {
            ClickOutcome::FirstSelected(_) => None,
            ClickOutcome::SecondSelected(pending) => Some(*pending),
        }
    }
}

/// Why a click was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum ClickRejected {
    /// Clicks are only accepted while playing.
    #[display("Game is {} and not accepting clicks", _0)]
    NotPlaying(GameStatus),

    /// A turn is waiting for its outcome delay.
    #[display("A turn is still resolving")]
    Processing,

    /// The card is already face up.
    #[display("Card {} is already face up", _0)]
    AlreadyFlipped(CardId),

    /// The card has already been paired.
    #[display("Card {} is already matched", _0)]
    AlreadyMatched(CardId),

    /// No card with this id is on the table.
    #[display("No card {} on the table", _0)]
    UnknownCard(CardId),
}

impl std::error::Error for ClickRejected {}

/// Why a deferred resolution was discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum ResolveError {
    /// The resolution belongs to a game that has since been replaced.
    #[display("Resolution from {} arrived during {}", found, expected)]
    StaleGeneration {
        /// Generation of the current game.
        expected: Generation,
        /// Generation captured by the resolution.
        found: Generation,
    },

    /// No turn is waiting to resolve.
    #[display("No turn is waiting to resolve")]
    NoPendingTurn,

    /// A turn is resolving, but not this one.
    #[display("Resolution {:?} does not match the pending turn", _0)]
    UnexpectedTurn(TurnOutcome),
}

impl std::error::Error for ResolveError {}
