//! Turn resolution.
//!
//! A turn opens with a first selection and closes when a second selection
//! has been judged and its delayed outcome applied. While the outcome is
//! pending the turn is `Resolving`, which doubles as the processing lock.

use crate::{Card, CardId, Deck, Symbol, Timings};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

/// Identifies one dealt game.
///
/// Every new game bumps the generation; deferred work captures it when
/// scheduled so that work belonging to an abandoned game can be discarded.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize, Display,
)]
#[display("gen{_0}")]
#[serde(transparent)]
pub struct Generation(u64);

impl Generation {
    /// Returns the following generation.
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// Raw counter value.
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Verdict on a pair of selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnOutcome {
    /// Both cards carry `symbol`.
    Match {
        /// The shared symbol.
        symbol: Symbol,
    },
    /// The cards differ and will be turned back down.
    Mismatch {
        /// First selection.
        first: CardId,
        /// Second selection.
        second: CardId,
    },
}

impl TurnOutcome {
    /// True for a match.
    pub fn is_match(&self) -> bool {
        matches!(self, TurnOutcome::Match { .. })
    }

    /// How long the outcome stays on screen before it is applied.
    pub fn delay(&self, timings: &Timings) -> Duration {
        match self {
            TurnOutcome::Match { .. } => timings.match_delay(),
            TurnOutcome::Mismatch { .. } => timings.mismatch_delay(),
        }
    }
}

/// Judges a pair of selections.
pub fn judge(first: &Card, second: &Card) -> TurnOutcome {
    if first.symbol() == second.symbol() {
        TurnOutcome::Match {
            symbol: first.symbol(),
        }
    } else {
        TurnOutcome::Mismatch {
            first: first.id(),
            second: second.id(),
        }
    }
}

/// A judged turn waiting for its delay to elapse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PendingResolution {
    generation: Generation,
    first: CardId,
    second: CardId,
    outcome: TurnOutcome,
    delay: Duration,
}

impl PendingResolution {
    /// Judges the second selection of a turn and stamps it with `generation`.
    #[instrument(skip(first, second, timings), fields(first = %first.id(), second = %second.id()))]
    pub fn judge(generation: Generation, first: &Card, second: &Card, timings: &Timings) -> Self {
        let outcome = judge(first, second);
        debug!(?outcome, "Turn judged");
        Self {
            generation,
            first: first.id(),
            second: second.id(),
            outcome,
            delay: outcome.delay(timings),
        }
    }

    /// Generation of the game the turn belongs to.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// First selection.
    pub fn first(&self) -> CardId {
        self.first
    }

    /// Second selection.
    pub fn second(&self) -> CardId {
        self.second
    }

    /// The verdict.
    pub fn outcome(&self) -> TurnOutcome {
        self.outcome
    }

    /// How long to wait before calling back into the game.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Applies the verdict to the deck.
    ///
    /// A match marks every card carrying the symbol; a mismatch turns down
    /// exactly the two selected cards.
    pub(crate) fn settle(&self, deck: &mut Deck) {
        match self.outcome {
            TurnOutcome::Match { symbol } => {
                let marked = deck.mark_matched(symbol);
                debug!(%symbol, marked, "Pair matched");
            }
            TurnOutcome::Mismatch { first, second } => {
                deck.turn_down(&[first, second]);
                debug!(%first, %second, "Pair turned back down");
            }
        }
    }
}

/// Selection state within the Playing phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Turn {
    /// Waiting for a first selection.
    #[default]
    Open,
    /// One card is up; waiting for the second.
    FirstPicked(CardId),
    /// Both cards are up and the outcome is pending. Clicks are locked out.
    Resolving(PendingResolution),
}

impl Turn {
    /// True while the processing lock is held.
    pub fn is_processing(&self) -> bool {
        matches!(self, Turn::Resolving(_))
    }

    /// The first selection, if any.
    pub fn first(&self) -> Option<CardId> {
        match self {
            Turn::Open => None,
            Turn::FirstPicked(first) => Some(*first),
            Turn::Resolving(pending) => Some(pending.first()),
        }
    }

    /// The second selection, if any.
    pub fn second(&self) -> Option<CardId> {
        match self {
            Turn::Resolving(pending) => Some(pending.second()),
            _ => None,
        }
    }

    /// The pending resolution, if any.
    pub fn pending(&self) -> Option<&PendingResolution> {
        match self {
            Turn::Resolving(pending) => Some(pending),
            _ => None,
        }
    }
}
